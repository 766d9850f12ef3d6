//! CLI argument parsing for interviewclassifier

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ic")]
#[command(author, version, about = "Classify onboarding interview replies", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a stored transcript into life areas, goals, habits and projects
    Classify {
        /// Transcript JSON file, or - for stdin
        #[arg(required = true)]
        transcript: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Detect the question type of an assistant message
    Detect {
        /// Assistant message text
        #[arg(required = true)]
        message: String,
    },

    /// Split a reply into items
    Split {
        /// Reply text
        #[arg(required = true)]
        utterance: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
