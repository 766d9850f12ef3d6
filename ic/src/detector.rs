//! Question type detection
//!
//! Looks at the most recent assistant message and guesses which interview
//! question it asks. The guess is stamped onto the user's next reply so the
//! classifier knows how to read it.
//!
//! Rules are an ordered table; the first matching rule wins:
//!
//! 1. yearly_goals
//! 2. quarterly_goals
//! 3. habits
//! 4. projects
//! 5. life_area_selection
//! 6. general (nothing matched)
//!
//! Life-area selection sits below the content questions: an assistant turn
//! like "Let's start with health. What are your big goals this year?" is
//! answered with goals. Areas named by the user are picked up by the
//! classifier from every user turn regardless of the stamp.

use std::sync::OnceLock;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::types::QuestionType;

/// Rule name, question type, case-insensitive pattern
const RULE_TABLE: &[(&str, QuestionType, &str)] = &[
    (
        "yearly-goals",
        QuestionType::YearlyGoals,
        r"big goals.*this year|yearly.*goals|goals.*year|question 1\b|goals.*annual",
    ),
    (
        "quarterly-goals",
        QuestionType::QuarterlyGoals,
        r"next (3|three) months|quarterly.*goals|3-month.*goals|question 2\b|next quarter|specific goals.*focus",
    ),
    (
        "habits",
        QuestionType::Habits,
        r"habits|routines.*build|maintain.*routine|question 3\b|daily.*routine|weekly.*routine",
    ),
    (
        "projects",
        QuestionType::Projects,
        r"projects|initiatives|question 4\b|working on.*projects",
    ),
    (
        "life-area-selection",
        QuestionType::LifeAreaSelection,
        r"which.*areas.*focus|life areas|areas.*like.*focus|start with",
    ),
];

struct Rule {
    name: &'static str,
    question_type: QuestionType,
    regex: Regex,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|(name, question_type, pattern)| Rule {
                name: *name,
                question_type: *question_type,
                regex: RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("detector rule pattern must compile"),
            })
            .collect()
    })
}

/// Prioritized rule list mapping assistant messages to question types
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionTypeDetector;

impl QuestionTypeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the question type of an assistant message
    pub fn detect(&self, assistant_message: &str) -> QuestionType {
        self.detect_with_rule(assistant_message).0
    }

    /// Detect the question type and report which rule fired
    pub fn detect_with_rule(&self, assistant_message: &str) -> (QuestionType, Option<&'static str>) {
        for rule in rules() {
            if rule.regex.is_match(assistant_message) {
                debug!(
                    "detect: rule '{}' matched -> {} ({:?})",
                    rule.name,
                    rule.question_type,
                    preview(assistant_message)
                );
                return (rule.question_type, Some(rule.name));
            }
        }

        debug!("detect: no rule matched -> general ({:?})", preview(assistant_message));
        (QuestionType::General, None)
    }

    /// Rule names in priority order
    pub fn rule_names(&self) -> Vec<&'static str> {
        RULE_TABLE.iter().map(|(name, _, _)| *name).collect()
    }
}

/// Detect the question type of an assistant message
pub fn detect(assistant_message: &str) -> QuestionType {
    QuestionTypeDetector.detect(assistant_message)
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
