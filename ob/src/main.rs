//! onboard - 1TaskAssistant onboarding
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use onboard::admin::{Admin, EXPECTED_USER_PREFIX, looks_like_user_id};
use onboard::backend::HttpBackend;
use onboard::cli::{AdminAction, Cli, Command, generate_after_help};
use onboard::config::Config;
use onboard::onboarding::{Account, print_plans, run_interview, run_onboarding};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("onboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("onboard.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(backend = %config.backend.base_url, chat = %config.chat.endpoint(), "onboard loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Run { user_id, name, email } => {
            let account = Account::new(user_id, name, email);
            run_onboarding(&config, account).await
        }
        Command::Interview { user_id, save } => {
            let account = Account::new(user_id, None, None);
            run_interview(&config, account, save).await
        }
        Command::Plans => {
            print_plans();
            Ok(())
        }
        Command::Admin { action, user_id, yes } => cmd_admin(&config, action, &user_id, yes).await,
    }
}

async fn cmd_admin(config: &Config, action: AdminAction, user_id: &str, yes: bool) -> Result<()> {
    debug!(?action, %user_id, %yes, "cmd_admin: called");
    if !looks_like_user_id(user_id) {
        eprintln!(
            "{} User ID does not start with \"{}\"",
            "Warning:".yellow(),
            EXPECTED_USER_PREFIX
        );
        if !yes {
            return Err(eyre::eyre!("Cancelled: pass --yes to continue with '{}'", user_id));
        }
    }

    let backend = HttpBackend::from_config(&config.backend).context("Failed to create backend client")?;
    let admin = Admin::new(Arc::new(backend));

    match action {
        AdminAction::ResetFlag => {
            admin.reset_flag(user_id).await.context("Failed to reset first-run flag")?;
            println!("{} First-run flag reset for {}", "✓".green(), user_id);
        }
        AdminAction::ResetInterview => {
            admin
                .reset_interview(user_id)
                .await
                .context("Failed to reset interview data")?;
            println!("{} Interview data reset for {}", "✓".green(), user_id);
            println!("The user can now go through onboarding again.");
        }
        AdminAction::GetProfile => match admin.get_profile(user_id).await.context("Failed to fetch profile")? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("No profile found for {}", user_id),
        },
        AdminAction::DeleteProfile => {
            admin.delete_profile(user_id).await.context("Failed to delete profile")?;
            println!("{} Profile deleted for {}", "✓".green(), user_id);
        }
        AdminAction::ResetAll => {
            let report = admin.reset_all(user_id).await.context("Failed to reset user data")?;
            for category in &report.deleted {
                println!("{} Deleted {}", "✓".green(), category.endpoint());
            }
            for category in &report.skipped {
                println!("{} No {} found for user", "!".yellow(), category.endpoint());
            }
            println!("{} User data reset complete", "✓".green());
        }
    }
    Ok(())
}
