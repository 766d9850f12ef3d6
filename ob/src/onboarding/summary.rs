//! Completion summary

use eyre::{Result, eyre};
use handlebars::Handlebars;
use interviewclassifier::{Category, ClassificationResult};
use serde::Serialize;
use tracing::debug;

use super::ProfileForm;

const SUMMARY_TEMPLATE: &str = r#"Welcome to 1TaskAssistant!
Your account has been successfully created and personalized

Your Setup Summary
  Account Type: {{account_type}}
  Email:        {{email}}
  Company:      {{company}}
  Timezone:     {{timezone}}

Life areas: {{#each life_areas}}{{#if @index}}, {{/if}}{{this}}{{/each}}
{{#each sections}}
{{heading}} ({{count}})
{{#each titles}}
  - {{this}}
{{/each}}
{{/each}}

Launch 1TaskAssistant: {{redirect_url}}
Need help getting started? Contact our support team at support@1taskassistant.com
"#;

#[derive(Serialize)]
struct Section {
    heading: &'static str,
    count: usize,
    titles: Vec<String>,
}

#[derive(Serialize)]
struct SummaryContext {
    account_type: &'static str,
    email: String,
    company: String,
    timezone: String,
    life_areas: Vec<&'static str>,
    sections: Vec<Section>,
    redirect_url: String,
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Text of the "you're all set" page
pub fn render_summary(profile: Option<&ProfileForm>, result: &ClassificationResult, redirect_url: &str) -> Result<String> {
    debug!(items = %result.item_count(), %redirect_url, "render_summary: called");

    let context = SummaryContext {
        account_type: profile.map(|p| p.account_type.plan().name).unwrap_or("Free"),
        email: or_default(profile.map(|p| p.email.as_str()), "Not provided"),
        company: or_default(profile.map(|p| p.company.as_str()), "Personal"),
        timezone: or_default(profile.map(|p| p.timezone.as_str()), "Not set"),
        life_areas: result.life_areas.iter().map(|a| a.label()).collect(),
        sections: Category::ALL
            .into_iter()
            .map(|category| {
                let items = result.list(category);
                Section {
                    heading: category.heading(),
                    count: items.len(),
                    titles: items.iter().map(|i| i.title.clone()).collect(),
                }
            })
            .collect(),
        redirect_url: redirect_url.to_string(),
    };

    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs.render_template(SUMMARY_TEMPLATE, &context)
        .map_err(|e| eyre!("Failed to render summary: {}", e))
}
