//! Chat wire types

use interviewclassifier::ConversationTurn;
use serde::{Deserialize, Serialize};

/// Body of one POST to the onboarding chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    pub conversation_history: Vec<ConversationTurn>,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>, history: &[ConversationTurn]) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            conversation_history: history.to_vec(),
        }
    }
}

/// Assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
