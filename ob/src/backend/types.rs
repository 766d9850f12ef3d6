//! Request and response bodies for the persistence API

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use interviewclassifier::{ClassificationResult, ConversationTurn, Item, LifeArea};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::onboarding::ProfileForm;

/// Stored user profile, as returned by `GET /profiles/{user}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub onboarding_completed: bool,

    #[serde(default)]
    pub first_run: bool,

    #[serde(default)]
    pub primary_life_areas: Vec<String>,

    /// Everything else the server keeps on the profile
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Interview payload kept on the profile for the suggestion engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewData {
    pub raw_responses: Vec<ConversationTurn>,
    pub final_summary: Option<String>,
    pub parsed_items: ClassificationResult,
    pub completed_at: DateTime<Utc>,
}

/// Partial profile update for `PUT /profiles/{user}`; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_run: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_life_areas: Option<Vec<LifeArea>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_area_priorities: Option<BTreeMap<String, usize>>,

    /// `Some(None)` clears the stored interview
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_data: Option<Option<InterviewData>>,
}

impl ProfileUpdate {
    /// Re-arm the suggestion engine's first-run flag
    pub fn first_run() -> Self {
        Self {
            first_run: Some(true),
            ..Default::default()
        }
    }

    /// Forget the interview so onboarding runs again
    pub fn clear_interview() -> Self {
        Self {
            onboarding_completed: Some(false),
            first_run: Some(true),
            interview_data: Some(None),
            ..Default::default()
        }
    }

    /// Mark onboarding complete and store the interview
    pub fn completed(result: &ClassificationResult, interview: InterviewData) -> Self {
        Self {
            onboarding_completed: Some(true),
            first_run: Some(true),
            primary_life_areas: Some(result.life_areas.clone()),
            life_area_priorities: Some(result.life_area_priorities()),
            interview_data: Some(Some(interview)),
        }
    }
}

/// Body of `POST /profiles`
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub onboarding_completed: bool,
    pub first_run: bool,
    pub primary_life_areas: Vec<LifeArea>,
    pub life_area_priorities: BTreeMap<String, usize>,
    pub interview_data: Option<InterviewData>,
}

/// Interview payload attached to the completed onboarding step
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingInterviewData {
    pub responses: Vec<ConversationTurn>,
    pub final_summary: Option<String>,
    pub parsed_items: ClassificationResult,
    pub completed_at: DateTime<Utc>,
    pub life_areas: Vec<LifeArea>,
    pub primary_goals: Vec<Item>,
    pub welcome_shown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_setup: Option<ProfileForm>,
}

/// Body of `PUT /onboarding/{user}/step`
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStepUpdate {
    pub step: String,
    pub interview_data: OnboardingInterviewData,
}

impl OnboardingStepUpdate {
    pub fn completed(interview_data: OnboardingInterviewData) -> Self {
        Self {
            step: "completed".to_string(),
            interview_data,
        }
    }
}

/// Body of `PUT /onboarding/{user}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingReset {
    pub current_step: String,
    pub completed_steps: Vec<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub welcome_shown: bool,
    pub interview_responses: Option<Vec<ConversationTurn>>,
}

impl OnboardingReset {
    /// Back to the welcome screen with nothing completed
    pub fn welcome() -> Self {
        Self {
            current_step: "welcome".to_string(),
            completed_steps: Vec::new(),
            is_completed: false,
            completed_at: None,
            welcome_shown: false,
            interview_responses: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// Body of `POST /{category endpoint}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub life_area: LifeArea,
    pub priority: Priority,
    pub status: ItemStatus,
}

impl ItemRecord {
    pub fn from_item(user_id: impl Into<String>, item: &Item) -> Self {
        Self {
            user_id: user_id.into(),
            title: item.title.clone(),
            description: item.description.clone(),
            life_area: item.life_area,
            priority: Priority::default(),
            status: ItemStatus::default(),
        }
    }
}
