//! Terminal front end for an interview

use colored::Colorize;
use eyre::Result;
use interviewclassifier::Role;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::{Interview, InterviewRecord, Reply};

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    Finish,
    AddArea,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Input::Message(line);
    }
    let cmd = line.split_whitespace().next().unwrap_or("");
    match cmd {
        "/finish" | "/f" => Input::Finish,
        "/add-area" | "/a" => Input::AddArea,
        "/history" => Input::History,
        "/help" | "/h" => Input::Help,
        "/quit" | "/q" | "/exit" => Input::Quit,
        _ => Input::Unknown(cmd),
    }
}

/// Drives an [`Interview`] from stdin/stdout
pub struct InterviewRepl {
    interview: Interview,
}

impl InterviewRepl {
    pub fn new(interview: Interview) -> Self {
        Self { interview }
    }

    /// Run until the interview completes (`Some`) or the user quits (`None`)
    pub async fn run(mut self) -> Result<Option<InterviewRecord>> {
        debug!(user_id = %self.interview.user_id(), "run: called");
        self.print_welcome();

        if let Some(greeting) = self.interview.start().await {
            print_assistant(&greeting, false);
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        while !self.interview.is_complete() {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.trim());

                    let reply = match parse_input(&line) {
                        Input::Message(text) => self.interview.send(text).await,
                        Input::Finish => self.interview.finish().await,
                        Input::AddArea => self.interview.add_area().await,
                        Input::History => {
                            self.print_history();
                            continue;
                        }
                        Input::Help => {
                            print_help();
                            continue;
                        }
                        Input::Quit => {
                            debug!("run: quit before completion");
                            return Ok(None);
                        }
                        Input::Unknown(cmd) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            println!("Type {} for available commands", "/help".yellow());
                            continue;
                        }
                    };

                    match &reply {
                        Reply::Assistant(text) => print_assistant(text, false),
                        Reply::Error(text) => print_assistant(text, true),
                        Reply::Ignored => {}
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    return Ok(None);
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!();
        println!("{}", "Interview complete.".bright_green().bold());
        Ok(Some(self.interview.into_record()))
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "1TaskAssistant Onboarding Interview".bright_cyan().bold());
        println!(
            "Type {} when you're done, {} for help",
            "/finish".yellow(),
            "/help".yellow()
        );
        println!();
    }

    fn print_history(&self) {
        let displayed = self.interview.displayed();
        if displayed.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation:".bright_cyan());
        for msg in displayed {
            let role = match msg.role {
                Role::User => "You".bright_green(),
                Role::Assistant if msg.is_error => "Error".red(),
                Role::Assistant => "Assistant".bright_blue(),
            };
            let preview: String = msg.content.chars().take(60).collect();
            let ellipsis = if msg.content.chars().count() > 60 { "..." } else { "" };
            println!("  {} {}{}", format!("[{}]", role).dimmed(), preview, ellipsis);
        }
        println!();
    }
}

fn print_assistant(text: &str, is_error: bool) {
    println!();
    if is_error {
        println!("{}", text.red());
    } else {
        println!("{}", text);
    }
    println!();
}

fn print_help() {
    println!();
    println!("{}", "Available Commands:".bright_cyan());
    println!("  {:14} Ask for your summary and finish", "/finish".yellow());
    println!("  {:14} Add another life area", "/add-area".yellow());
    println!("  {:14} Show the conversation so far", "/history".yellow());
    println!("  {:14} Show this help", "/help".yellow());
    println!("  {:14} Leave without finishing", "/quit".yellow());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_message() {
        assert_eq!(parse_input("  Run a marathon "), Input::Message("Run a marathon"));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("/finish"), Input::Finish);
        assert_eq!(parse_input("/add-area"), Input::AddArea);
        assert_eq!(parse_input("/history"), Input::History);
        assert_eq!(parse_input("/h"), Input::Help);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(parse_input("/bogus now"), Input::Unknown("/bogus"));
    }
}
