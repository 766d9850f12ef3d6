//! Transcript recording and loading
//!
//! Recording stamps each user turn with the question type of the assistant
//! message right before it. Loading accepts whatever a frontend stored,
//! filling gaps with defaults instead of failing.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::detector::QuestionTypeDetector;
use crate::types::{ConversationTurn, QuestionType, Role};

/// Ordered interview transcript
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
    detector: QuestionTypeDetector,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-recorded turns
    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self {
            turns,
            detector: QuestionTypeDetector,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn into_turns(self) -> Vec<ConversationTurn> {
        self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Record an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ConversationTurn {
        self.turns.push(ConversationTurn::assistant(content));
        &self.turns[self.turns.len() - 1]
    }

    /// Record a user reply, stamped with the question it answers
    pub fn push_user(&mut self, content: impl Into<String>) -> &ConversationTurn {
        let question_type = self.detector.detect(self.last_assistant_message().unwrap_or(""));
        debug!("push_user: stamping reply as {}", question_type);
        self.turns
            .push(ConversationTurn::user(content).with_question(question_type));
        &self.turns[self.turns.len() - 1]
    }

    /// Content of the most recent assistant turn
    pub fn last_assistant_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }

    /// Load a stored transcript. Only invalid JSON is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Load from a JSON array of turns, or an object holding one under
    /// `responses` / `raw_responses`
    pub fn from_value(value: &Value) -> Self {
        let entries = match value {
            Value::Array(entries) => entries.as_slice(),
            Value::Object(map) => match map.get("responses").or_else(|| map.get("raw_responses")) {
                Some(Value::Array(entries)) => entries.as_slice(),
                _ => {
                    warn!("from_value: object without a responses array, empty transcript");
                    &[]
                }
            },
            _ => {
                warn!("from_value: not an array or object, empty transcript");
                &[]
            }
        };

        let turns: Vec<ConversationTurn> = entries.iter().flat_map(turns_from_entry).collect();
        debug!("from_value: {} entries -> {} turns", entries.len(), turns.len());
        Self::from_turns(turns)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.turns)
    }
}

fn text_field<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

fn timestamp_field(entry: &Value) -> DateTime<Utc> {
    text_field(entry, "timestamp")
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn question_fields(entry: &Value) -> (Option<QuestionType>, Option<u8>) {
    let question_type = text_field(entry, "question_type")
        .or_else(|| text_field(entry, "questionType"))
        .map(QuestionType::from_tag);
    let question_number = entry
        .get("question_number")
        .and_then(Value::as_u64)
        .and_then(|n| u8::try_from(n).ok())
        .or_else(|| question_type.and_then(|q| q.number()));
    (question_type, question_number)
}

/// One stored entry becomes zero, one or two turns
fn turns_from_entry(entry: &Value) -> Vec<ConversationTurn> {
    if !entry.is_object() {
        debug!("turns_from_entry: skipping non-object entry");
        return Vec::new();
    }

    let timestamp = timestamp_field(entry);
    let (question_type, question_number) = question_fields(entry);

    let user_turn = |content: &str| ConversationTurn {
        role: Role::User,
        content: content.to_string(),
        question_type,
        question_number,
        timestamp,
    };
    let assistant_turn = |content: &str| ConversationTurn {
        role: Role::Assistant,
        content: content.to_string(),
        question_type: None,
        question_number: None,
        timestamp,
    };

    match text_field(entry, "role") {
        Some(role) if role.eq_ignore_ascii_case("user") => {
            vec![user_turn(text_field(entry, "content").unwrap_or(""))]
        }
        Some(role) if role.eq_ignore_ascii_case("assistant") => {
            vec![assistant_turn(text_field(entry, "content").unwrap_or(""))]
        }
        _ => {
            // legacy exchange: {"assistant": "...", "user": "..."}
            let mut turns = Vec::new();
            if let Some(text) = text_field(entry, "assistant") {
                turns.push(assistant_turn(text));
            }
            if let Some(text) = text_field(entry, "user") {
                turns.push(user_turn(text));
            }
            if turns.is_empty() {
                debug!("turns_from_entry: no recognizable role, skipping");
            }
            turns
        }
    }
}
