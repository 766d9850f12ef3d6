use std::io::Read;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use interviewclassifier::cli::{Cli, Command, OutputFormat};
use interviewclassifier::config::Config;
use interviewclassifier::{Category, ClassificationResult, QuestionTypeDetector, ResponseClassifier, Transcript};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    Ok(())
}

fn read_transcript(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transcript from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).context(format!("Failed to read transcript: {}", source))
}

fn print_text(result: &ClassificationResult) {
    let areas: Vec<&str> = result.life_areas.iter().map(|a| a.label()).collect();
    println!("{} {}", "Life areas:".bright_cyan(), areas.join(", "));

    for category in Category::ALL {
        let items = result.list(category);
        println!("{} ({})", category.heading().bright_cyan(), items.len());
        for item in items {
            println!("  {} {} {}", "-".dimmed(), item.title, format!("[{}]", item.life_area).dimmed());
        }
    }
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("interviewclassifier starting");

    match cli.command {
        Command::Classify { transcript, format } => {
            let json = read_transcript(&transcript)?;
            let transcript = Transcript::from_json(&json).context("Transcript is not valid JSON")?;
            let result = ResponseClassifier::new(config.splitter).classify(transcript.turns());
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print_text(&result),
            }
        }
        Command::Detect { message } => {
            let (question_type, rule) = QuestionTypeDetector::new().detect_with_rule(&message);
            match rule {
                Some(rule) => println!("{} {}", question_type.as_str().green(), format!("({})", rule).dimmed()),
                None => println!("{}", question_type.as_str().yellow()),
            }
        }
        Command::Split { utterance } => {
            let items = interviewclassifier::split_with(&utterance, &config.splitter);
            if items.is_empty() {
                println!("No items found");
            } else {
                for item in items {
                    println!("{} {}", "✓".green(), item.title);
                }
            }
        }
    }

    Ok(())
}
