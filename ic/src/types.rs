//! Transcript and classification data types

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Inferred topic of the assistant question a user turn is answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    YearlyGoals,
    QuarterlyGoals,
    Habits,
    Projects,
    LifeAreaSelection,
    #[default]
    General,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        Self::YearlyGoals,
        Self::QuarterlyGoals,
        Self::Habits,
        Self::Projects,
        Self::LifeAreaSelection,
        Self::General,
    ];

    /// Wire tag, e.g. `yearly_goals`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YearlyGoals => "yearly_goals",
            Self::QuarterlyGoals => "quarterly_goals",
            Self::Habits => "habits",
            Self::Projects => "projects",
            Self::LifeAreaSelection => "life_area_selection",
            Self::General => "general",
        }
    }

    /// Lenient parse: anything unrecognized is `General`
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }

    /// Interview question number attached to history entries (1-4 for the content questions)
    pub fn number(&self) -> Option<u8> {
        match self {
            Self::YearlyGoals => Some(1),
            Self::QuarterlyGoals => Some(2),
            Self::Habits => Some(3),
            Self::Projects => Some(4),
            Self::LifeAreaSelection | Self::General => None,
        }
    }

    /// Item category collected for replies to this question, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::YearlyGoals => Some(Category::YearlyGoal),
            Self::QuarterlyGoals => Some(Category::QuarterlyGoal),
            Self::Habits => Some(Category::Habit),
            Self::Projects => Some(Category::Project),
            Self::LifeAreaSelection | Self::General => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// A user-chosen area of personal focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeArea {
    #[serde(alias = "professional")]
    ProfessionalWork,
    #[serde(alias = "personal_growth")]
    PersonalGrowthLearning,
    #[serde(alias = "family_relationships")]
    Relationships,
    HealthSelfCare,
    Finances,
    Community,
    #[default]
    Uncategorized,
}

impl LifeArea {
    pub const ALL: [LifeArea; 7] = [
        Self::ProfessionalWork,
        Self::PersonalGrowthLearning,
        Self::Relationships,
        Self::HealthSelfCare,
        Self::Finances,
        Self::Community,
        Self::Uncategorized,
    ];

    /// Backend enum value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfessionalWork => "professional_work",
            Self::PersonalGrowthLearning => "personal_growth_learning",
            Self::Relationships => "relationships",
            Self::HealthSelfCare => "health_self_care",
            Self::Finances => "finances",
            Self::Community => "community",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProfessionalWork => "Professional / Work",
            Self::PersonalGrowthLearning => "Personal Growth & Learning",
            Self::Relationships => "Family & Relationships",
            Self::HealthSelfCare => "Health & Self-Care",
            Self::Finances => "Finances",
            Self::Community => "Community",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for LifeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of extracted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    YearlyGoal,
    QuarterlyGoal,
    Habit,
    Project,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::YearlyGoal, Self::QuarterlyGoal, Self::Habit, Self::Project];

    /// Backend collection the records of this category live in
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::YearlyGoal => "yearly-goals",
            Self::QuarterlyGoal => "quarterly-goals",
            Self::Habit => "habits",
            Self::Project => "projects",
        }
    }

    /// Plural heading used in listings
    pub fn heading(&self) -> &'static str {
        match self {
            Self::YearlyGoal => "Yearly goals",
            Self::QuarterlyGoal => "Quarterly goals",
            Self::Habit => "Habits",
            Self::Project => "Projects",
        }
    }
}

/// One message of the interview, in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,

    #[serde(default)]
    pub content: String,

    /// Set when the turn is recorded, from the preceding assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u8>,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            question_type: None,
            question_number: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            question_type: None,
            question_number: None,
            timestamp: Utc::now(),
        }
    }

    /// Stamp the question this turn answers
    pub fn with_question(mut self, question_type: QuestionType) -> Self {
        self.question_type = Some(question_type);
        self.question_number = question_type.number();
        self
    }

    /// Question type, treating a missing stamp as `General`
    pub fn effective_question_type(&self) -> QuestionType {
        self.question_type.unwrap_or_default()
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// A discrete item split out of one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub title: String,
    pub description: String,
}

/// An extracted goal, habit or project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub description: String,
    pub life_area: LifeArea,
    pub category: Category,
}

impl Item {
    pub fn from_raw(raw: RawItem, life_area: LifeArea, category: Category) -> Self {
        Self {
            title: raw.title,
            description: raw.description,
            life_area,
            category,
        }
    }
}

/// Output of one classification pass over a completed interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub life_areas: Vec<LifeArea>,
    #[serde(default)]
    pub yearly_goals: Vec<Item>,
    #[serde(default)]
    pub quarterly_goals: Vec<Item>,
    #[serde(default)]
    pub habits: Vec<Item>,
    #[serde(default)]
    pub projects: Vec<Item>,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            life_areas: vec![LifeArea::Uncategorized],
            yearly_goals: Vec::new(),
            quarterly_goals: Vec::new(),
            habits: Vec::new(),
            projects: Vec::new(),
        }
    }
}

impl ClassificationResult {
    /// Items of one category, in transcript order
    pub fn list(&self, category: Category) -> &[Item] {
        match category {
            Category::YearlyGoal => &self.yearly_goals,
            Category::QuarterlyGoal => &self.quarterly_goals,
            Category::Habit => &self.habits,
            Category::Project => &self.projects,
        }
    }

    pub(crate) fn list_mut(&mut self, category: Category) -> &mut Vec<Item> {
        match category {
            Category::YearlyGoal => &mut self.yearly_goals,
            Category::QuarterlyGoal => &mut self.quarterly_goals,
            Category::Habit => &mut self.habits,
            Category::Project => &mut self.projects,
        }
    }

    /// All items, category by category
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        Category::ALL.into_iter().flat_map(move |c| self.list(c).iter())
    }

    pub fn item_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.list(*c).len()).sum()
    }

    /// Yearly goals, quarterly goals and habits: the legacy `primary_goals` field
    pub fn primary_goals(&self) -> Vec<&Item> {
        self.yearly_goals
            .iter()
            .chain(self.quarterly_goals.iter())
            .chain(self.habits.iter())
            .collect()
    }

    /// Life area to 1-based rank in first-seen order
    pub fn life_area_priorities(&self) -> BTreeMap<String, usize> {
        self.life_areas
            .iter()
            .enumerate()
            .map(|(i, area)| (area.as_str().to_string(), i + 1))
            .collect()
    }
}
