//! Onboarding flow: profile, plan, terms, interview, save, summary

use std::sync::Arc;

use colored::Colorize;
use eyre::{Context, Result, eyre};
use interviewclassifier::{Category, ClassificationResult};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info, warn};

use super::profile::ROLES;
use super::{Account, AccountType, OnboardingStep, ProfileForm, TERMS_TEXT, UsageAgreement, render_summary, save_interview};
use crate::backend::HttpBackend;
use crate::chat::HttpChatClient;
use crate::config::Config;
use crate::interview::{Interview, InterviewRecord, InterviewRepl};

/// Onboarding progress for one account. Each step can only be completed in order.
#[derive(Debug)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    account: Account,
    profile: Option<ProfileForm>,
    agreement: UsageAgreement,
    record: Option<InterviewRecord>,
}

impl OnboardingFlow {
    pub fn new(account: Account) -> Self {
        debug!(user_id = %account.local_account_id, "OnboardingFlow::new: called");
        Self {
            step: OnboardingStep::Signup,
            account,
            profile: None,
            agreement: UsageAgreement::new(),
            record: None,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn profile(&self) -> Option<&ProfileForm> {
        self.profile.as_ref()
    }

    pub fn record(&self) -> Option<&InterviewRecord> {
        self.record.as_ref()
    }

    fn expect_step(&self, expected: OnboardingStep) -> Result<()> {
        if self.step != expected {
            return Err(eyre!("Onboarding is at step '{}', not '{}'", self.step, expected));
        }
        Ok(())
    }

    fn advance(&mut self) {
        let next = self.step.next();
        info!(from = %self.step, to = %next, "Onboarding step complete");
        self.step = next;
    }

    /// Identity has been resolved by the provider
    pub fn sign_in(&mut self) -> Result<()> {
        self.expect_step(OnboardingStep::Signup)?;
        self.advance();
        Ok(())
    }

    pub fn submit_profile(&mut self, form: ProfileForm) -> Result<()> {
        self.expect_step(OnboardingStep::Profile)?;
        form.validate().map_err(|e| eyre!("Invalid profile: {}", e))?;
        self.profile = Some(form);
        self.advance();
        Ok(())
    }

    pub fn accept_terms(&mut self) -> Result<()> {
        self.expect_step(OnboardingStep::Agreement)?;
        self.agreement.accept();
        self.advance();
        Ok(())
    }

    pub fn complete_interview(&mut self, record: InterviewRecord) -> Result<()> {
        self.expect_step(OnboardingStep::Interview)?;
        if !self.agreement.is_accepted() {
            return Err(eyre!("Terms must be accepted before the interview"));
        }
        self.record = Some(record);
        self.advance();
        Ok(())
    }
}

/// Line prompts on top of rustyline
struct Prompter {
    rl: DefaultEditor,
}

impl Prompter {
    fn new() -> Result<Self> {
        let rl = DefaultEditor::new().map_err(|e| eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { rl })
    }

    /// `None` on Ctrl+C / Ctrl+D
    fn ask(&mut self, label: &str, default: &str) -> Result<Option<String>> {
        let prompt = if default.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, default.dimmed())
        };
        match self.rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                Ok(Some(if line.is_empty() { default.to_string() } else { line.to_string() }))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(eyre!("Readline error: {}", e)),
        }
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "Y/n" } else { "y/N" };
        let Some(answer) = self.ask(&format!("{} ({})", label, hint), "")? else {
            return Ok(None);
        };
        Ok(Some(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        }))
    }
}

fn print_heading(step: OnboardingStep, title: &str) {
    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", step.position(), OnboardingStep::ALL.len()).dimmed(),
        title.bright_cyan().bold()
    );
}

/// Print the plan catalog
pub fn print_plans() {
    for plan in AccountType::catalog() {
        println!(
            "{} {} {}",
            plan.name.bright_cyan().bold(),
            plan.price.green(),
            format!("({})", plan.id).dimmed()
        );
        println!("  {}", plan.description);
        for feature in plan.features {
            println!("  {} {}", "✓".green(), feature);
        }
    }
}

fn collect_profile(prompter: &mut Prompter, account: &Account) -> Result<Option<ProfileForm>> {
    let mut form = ProfileForm::for_account(account);
    loop {
        macro_rules! ask {
            ($label:expr, $default:expr) => {
                match prompter.ask($label, $default)? {
                    Some(v) => v,
                    None => return Ok(None),
                }
            };
        }

        form.display_name = ask!("Display name", &form.display_name);
        form.email = ask!("Email", &form.email);
        form.company = ask!("Company (optional)", &form.company);
        form.role = ask!(&format!("Role ({})", ROLES.join(", ")), &form.role);

        println!();
        print_plans();
        let plan = ask!("Plan", form.account_type.as_str());
        match plan.parse::<AccountType>() {
            Ok(account_type) => form.account_type = account_type,
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                continue;
            }
        }

        form.timezone = ask!("Timezone", &form.timezone);
        form.notifications = match prompter.confirm("Email notifications", form.notifications)? {
            Some(v) => v,
            None => return Ok(None),
        };

        match form.validate() {
            Ok(()) => return Ok(Some(form)),
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }
}

fn review_terms(prompter: &mut Prompter) -> Result<bool> {
    let agreement = UsageAgreement::new();
    println!("{}", agreement.preview());
    println!();
    if prompter.confirm("Show full terms", false)? == Some(true) {
        println!("{}", TERMS_TEXT);
        println!();
    }
    loop {
        match prompter.confirm("I have read and agree to the Terms of Service and Privacy Policy", false)? {
            Some(true) => return Ok(true),
            Some(false) => println!("{}", "You must accept the terms to continue.".yellow()),
            None => return Ok(false),
        }
    }
}

/// Print a classification result
pub fn print_result(result: &ClassificationResult) {
    let areas: Vec<&str> = result.life_areas.iter().map(|a| a.label()).collect();
    println!("{} {}", "Life areas:".bright_cyan(), areas.join(", "));
    for category in Category::ALL {
        let items = result.list(category);
        println!("{} ({})", category.heading().bright_cyan(), items.len());
        for item in items {
            println!("  {} {}", "-".dimmed(), item.title);
        }
    }
}

async fn interview(config: &Config, account: &Account) -> Result<Option<InterviewRecord>> {
    let chat = HttpChatClient::from_config(&config.chat).context("Failed to create chat client")?;
    let interview = Interview::new(Arc::new(chat), account.local_account_id.clone(), config.chat.timeout());
    InterviewRepl::new(interview).run().await
}

async fn persist(
    config: &Config,
    account: &Account,
    profile: Option<&ProfileForm>,
    record: &InterviewRecord,
    result: &ClassificationResult,
) -> Result<()> {
    let backend = HttpBackend::from_config(&config.backend).context("Failed to create backend client")?;
    let report = save_interview(&backend, account, profile, record, result, config.app.create_items).await?;
    println!(
        "{} Saved interview ({} items created{})",
        "✓".green(),
        report.items_created,
        if report.items_failed > 0 {
            format!(", {} failed", report.items_failed)
        } else {
            String::new()
        }
    );
    Ok(())
}

/// Full terminal onboarding for one account
pub async fn run_onboarding(config: &Config, account: Account) -> Result<()> {
    debug!(user_id = %account.local_account_id, "run_onboarding: called");
    let mut flow = OnboardingFlow::new(account);
    let mut prompter = Prompter::new()?;

    println!("{}", format!("Welcome, {}!", flow.account().display_name()).bright_green().bold());
    flow.sign_in()?;

    print_heading(flow.step(), "Set up your profile");
    let Some(form) = collect_profile(&mut prompter, flow.account())? else {
        println!("{}", "Onboarding cancelled.".yellow());
        return Ok(());
    };
    flow.submit_profile(form)?;

    print_heading(flow.step(), "Terms of Service");
    if !review_terms(&mut prompter)? {
        println!("{}", "Onboarding cancelled.".yellow());
        return Ok(());
    }
    flow.accept_terms()?;

    print_heading(flow.step(), "Tell us about your goals");
    let Some(record) = interview(config, flow.account()).await? else {
        println!("{}", "Interview not finished. Run `ob run` again to pick up onboarding.".yellow());
        return Ok(());
    };
    flow.complete_interview(record)?;

    let record = flow.record().ok_or_else(|| eyre!("Interview record missing"))?;
    let result = record.classify(&config.classifier);
    if let Err(e) = persist(config, flow.account(), flow.profile(), record, &result).await {
        warn!(error = %e, "run_onboarding: save failed");
        println!("{} {:#}", "✗".red(), e);
        println!("{}", "Please contact support@1taskassistant.com".yellow());
    }

    print_heading(flow.step(), "All set");
    println!("{}", render_summary(flow.profile(), &result, &config.app.redirect_url)?);
    Ok(())
}

/// Interview only, printing what was extracted; persists when `save` is set
pub async fn run_interview(config: &Config, account: Account, save: bool) -> Result<()> {
    debug!(user_id = %account.local_account_id, %save, "run_interview: called");
    let Some(record) = interview(config, &account).await? else {
        println!("{}", "Interview not finished.".yellow());
        return Ok(());
    };

    let result = record.classify(&config.classifier);
    println!();
    print_result(&result);

    if save {
        persist(config, &account, None, &record, &result).await?;
    }
    Ok(())
}
