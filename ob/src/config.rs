//! Onboard configuration types and loading

use eyre::{Context, Result};
use interviewclassifier::SplitOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `backend.base-url`
pub const BACKEND_URL_ENV: &str = "ONBOARD_BACKEND_URL";

/// Environment variable overriding `chat.base-url`
pub const CHAT_URL_ENV: &str = "ONBOARD_CHAT_URL";

/// Main onboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote persistence API
    pub backend: BackendConfig,

    /// Chat endpoint driving the interview
    pub chat: ChatConfig,

    /// Application behavior
    pub app: AppConfig,

    /// How interview replies are split into items
    pub classifier: SplitOptions,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        check_url("backend.base-url", &self.backend.base_url)?;
        check_url("chat.base-url", &self.chat.base_url)?;
        if self.backend.timeout_ms == 0 {
            return Err(eyre::eyre!("backend.timeout-ms must be greater than zero"));
        }
        if self.chat.timeout_ms == 0 {
            return Err(eyre::eyre!("chat.timeout-ms must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Read just the log level, before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load_file_chain(config_path).ok().and_then(|c| c.app.log_level)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .onboard.yml
        let local_config = PathBuf::from(".onboard.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/onboard/onboard.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("onboard").join("onboard.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!(%url, "apply_env_overrides: backend url from environment");
            self.backend.base_url = url;
        }
        if let Ok(url) = std::env::var(CHAT_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!(%url, "apply_env_overrides: chat url from environment");
            self.chat.base_url = url;
        }
    }
}

fn check_url(key: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(eyre::eyre!("{} must not be empty", key));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(eyre::eyre!("{} must be an http(s) URL, got '{}'", key, url));
    }
    Ok(())
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// API base URL, including the `/api` prefix
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://1task-backend-api-gse0fsgngtfxhjc6.southcentralus-01.azurewebsites.net/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Chat endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Chat service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the onboarding conversation endpoint
    pub path: String,

    /// Per-message timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7072".to_string(),
            path: "/api/onboarding".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the onboarding endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Application behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the user is sent once onboarding is done
    #[serde(rename = "redirect-url")]
    pub redirect_url: String,

    /// Create one backend record per extracted goal, habit and project
    #[serde(rename = "create-items")]
    pub create_items: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redirect_url: "https://app.1taskassistant.com".to_string(),
            create_items: true,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.backend.base_url.ends_with("/api"));
        assert_eq!(config.chat.base_url, "http://localhost:7072");
        assert_eq!(config.chat.timeout(), Duration::from_secs(30));
        assert!(config.app.create_items);
        assert_eq!(config.classifier.max_items, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chat_endpoint_joins_cleanly() {
        let chat = ChatConfig {
            base_url: "http://localhost:7072/".to_string(),
            path: "/api/onboarding".to_string(),
            timeout_ms: 1,
        };
        assert_eq!(chat.endpoint(), "http://localhost:7072/api/onboarding");
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
backend:
  base-url: https://api.example.com/api
  timeout-ms: 5000

chat:
  base-url: https://chat.example.com
  timeout-ms: 10000

app:
  create-items: false
  log-level: debug

classifier:
  max-items: 3
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.backend.base_url, "https://api.example.com/api");
        assert_eq!(config.backend.timeout_ms, 5000);
        assert_eq!(config.chat.base_url, "https://chat.example.com");
        assert_eq!(config.chat.path, "/api/onboarding");
        assert!(!config.app.create_items);
        assert_eq!(config.app.log_level.as_deref(), Some("debug"));
        assert_eq!(config.classifier.max_items, 3);
        assert_eq!(config.classifier.max_title_chars, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.chat.base_url = "localhost:7072".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chat.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_urls() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("onboard.yml");
        fs::write(&path, "chat:\n  base-url: http://from-file:1\n").unwrap();

        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var(CHAT_URL_ENV, "http://from-env:2");
            std::env::remove_var(BACKEND_URL_ENV);
        }
        let config = Config::load(Some(&path)).unwrap();
        unsafe {
            std::env::remove_var(CHAT_URL_ENV);
        }

        assert_eq!(config.chat.base_url, "http://from-env:2");
        assert_eq!(config.backend.base_url, BackendConfig::default().base_url);
    }

    #[test]
    #[serial]
    fn test_load_log_level_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("onboard.yml");
        fs::write(&path, "app:\n  log-level: WARN\n").unwrap();

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
        assert!(Config::load_log_level(Some(&temp.path().join("missing.yml"))).is_none());
    }
}
