//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

/// onboard - 1TaskAssistant onboarding from the terminal
#[derive(Parser)]
#[command(
    name = "ob",
    about = "Onboarding for 1TaskAssistant: profile, terms, chat interview and saved results",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full onboarding flow
    Run {
        /// Account id from the identity provider
        #[arg(short, long, default_value = "anonymous")]
        user_id: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Sign-in email
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Run only the chat interview and print what was extracted
    Interview {
        /// Account id from the identity provider
        #[arg(short, long, default_value = "anonymous")]
        user_id: String,

        /// Save the results to the backend
        #[arg(short, long)]
        save: bool,
    },

    /// List the available account plans
    Plans,

    /// Support tools for a user's onboarding data
    Admin {
        /// What to do
        #[arg(value_enum)]
        action: AdminAction,

        /// Account id, normally starting with "c9"
        user_id: String,

        /// Proceed even if the user id looks wrong
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdminAction {
    /// Re-arm the first-run flag
    ResetFlag,
    /// Clear the interview and restart onboarding
    ResetInterview,
    /// Print the stored profile
    GetProfile,
    /// Delete the profile
    DeleteProfile,
    /// Reset the interview and delete all goals, habits and projects
    ResetAll,
}

impl AdminAction {
    /// Whether the action changes stored data
    pub fn is_destructive(&self) -> bool {
        !matches!(self, AdminAction::GetProfile)
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("onboard")
        .join("logs")
        .join("onboard.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin() {
        let cli = Cli::try_parse_from(["ob", "admin", "reset-interview", "c9abc"]).unwrap();
        match cli.command {
            Command::Admin { action, user_id, yes } => {
                assert_eq!(action, AdminAction::ResetInterview);
                assert_eq!(user_id, "c9abc");
                assert!(!yes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["ob", "--log-level", "debug", "run"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Run { user_id, name, email } => {
                assert_eq!(user_id, "anonymous");
                assert!(name.is_none());
                assert!(email.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_get_profile_is_read_only() {
        assert!(!AdminAction::GetProfile.is_destructive());
        assert!(AdminAction::ResetAll.is_destructive());
    }
}
