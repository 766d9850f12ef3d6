//! Account identity, profile form, plan catalog and terms

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in identity as handed over by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub local_account_id: String,
    pub name: Option<String>,
    /// Sign-in name; an email address for most providers
    pub username: Option<String>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            local_account_id: "anonymous".to_string(),
            name: None,
            username: None,
        }
    }
}

impl Account {
    pub fn new(local_account_id: impl Into<String>, name: Option<String>, username: Option<String>) -> Self {
        let local_account_id = local_account_id.into();
        let local_account_id = if local_account_id.trim().is_empty() {
            Account::default().local_account_id
        } else {
            local_account_id
        };
        Self {
            local_account_id,
            name,
            username,
        }
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.local_account_id)
    }
}

/// Plan tier chosen during profile setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Free,
    Pro,
    Premium,
}

/// Catalog entry for an account type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub id: AccountType,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [Self::Free, Self::Pro, Self::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }

    pub fn plan(&self) -> Plan {
        match self {
            Self::Free => Plan {
                id: *self,
                name: "Free",
                description: "Basic task management features",
                price: "$0/month",
                features: &["Up to 50 tasks per month", "Basic goal tracking", "Web access"],
            },
            Self::Pro => Plan {
                id: *self,
                name: "Pro",
                description: "Advanced productivity features",
                price: "$4.99/month",
                features: &[
                    "Unlimited tasks",
                    "Advanced analytics",
                    "Mobile app access",
                    "Priority support",
                ],
            },
            Self::Premium => Plan {
                id: *self,
                name: "Premium",
                description: "Full enterprise features",
                price: "$9.99/month",
                features: &[
                    "Everything in Pro",
                    "Team collaboration",
                    "API access",
                    "Custom integrations",
                ],
            },
        }
    }

    pub fn catalog() -> Vec<Plan> {
        Self::ALL.iter().map(|t| t.plan()).collect()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.plan().name.eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown account type '{}' (expected free, pro or premium)", s))
    }
}

/// Profile setup answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub account_type: AccountType,
    pub timezone: String,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_notifications() -> bool {
    true
}

impl ProfileForm {
    /// Prefilled from the identity provider
    pub fn for_account(account: &Account) -> Self {
        Self {
            display_name: account.name.clone().unwrap_or_default(),
            email: account.username.clone().unwrap_or_default(),
            company: String::new(),
            role: String::new(),
            account_type: AccountType::default(),
            timezone: local_timezone(),
            notifications: default_notifications(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.display_name.trim().is_empty() {
            return Err("display name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err(format!("'{}' is not an email address", self.email));
        }
        Ok(())
    }
}

/// Role choices offered on the profile form
pub const ROLES: &[&str] = &["student", "developer", "manager", "entrepreneur", "consultant", "other"];

fn local_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}

pub const TERMS_TEXT: &str = r#"TERMS OF SERVICE AND PRIVACY POLICY

1. ACCEPTANCE OF TERMS
By accessing and using OneTaskAssistant ("the Service"), you agree to be bound by these Terms of Service.

2. DESCRIPTION OF SERVICE
OneTaskAssistant is an AI-powered productivity and task management platform designed to help users organize, prioritize, and complete their tasks more effectively.

3. USER ACCOUNTS
- You must provide accurate and complete registration information
- You are responsible for maintaining the confidentiality of your account
- You must notify us immediately of any unauthorized use of your account

4. PRIVACY AND DATA PROTECTION
- We collect and process personal data in accordance with our Privacy Policy
- Your data is encrypted and stored securely
- We do not sell or share your personal information with third parties without consent
- You have the right to request deletion of your personal data

5. ACCEPTABLE USE
You agree not to:
- Use the service for any illegal purposes
- Attempt to gain unauthorized access to the service
- Interfere with or disrupt the service
- Upload malicious content or spam

6. INTELLECTUAL PROPERTY
- The Service and its content are owned by OneTaskAssistant and protected by copyright
- You retain ownership of content you create using the Service
- You grant us a license to use your content to provide the Service

7. LIMITATION OF LIABILITY
The Service is provided "as is" without warranties. We are not liable for any indirect, incidental, or consequential damages.

8. TERMINATION
We may terminate or suspend your account at any time for violation of these terms.

9. CHANGES TO TERMS
We may update these terms at any time. Continued use constitutes acceptance of new terms.

10. CONTACT INFORMATION
For questions about these terms, contact us at support@1taskassistant.com

Last updated: September 2025"#;

/// Terms acceptance
#[derive(Debug, Clone, Default)]
pub struct UsageAgreement {
    accepted_at: Option<DateTime<Utc>>,
}

impl UsageAgreement {
    const PREVIEW_CHARS: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Opening part of the terms, for a first look
    pub fn preview(&self) -> String {
        if TERMS_TEXT.chars().count() <= Self::PREVIEW_CHARS {
            return TERMS_TEXT.to_string();
        }
        let head: String = TERMS_TEXT.chars().take(Self::PREVIEW_CHARS).collect();
        format!("{}...", head)
    }

    pub fn accept(&mut self) {
        if self.accepted_at.is_none() {
            self.accepted_at = Some(Utc::now());
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }

    pub fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
    }
}
