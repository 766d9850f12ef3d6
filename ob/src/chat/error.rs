//! Chat error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the chat service
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ChatError::Timeout(_) => true,
            ChatError::Network(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Text shown in place of the assistant reply when a message fails
    pub fn user_message(&self) -> String {
        if self.is_timeout() {
            return "The request timed out. Please try sending your message again.".to_string();
        }
        format!("I'm having trouble connecting right now. Please try again. (Error: {})", self)
    }
}
