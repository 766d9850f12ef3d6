//! Interview session

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use interviewclassifier::{
    ClassificationResult, ConversationTurn, ResponseClassifier, Role, SplitOptions, Transcript, is_completion_request,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::{ChatClient, ChatError, ChatRequest};

/// Message that asks the chat service to open the interview
pub const START_MESSAGE: &str = "start";

/// Shown when the chat service cannot open the interview
pub const WELCOME_FALLBACK: &str = "Hi! I'm OneTaskAssistant, your personal productivity coach. I can help you set up your personal dashboard. People often like to track different life areas (for example: Professional / Work, Personal Growth & Learning, Family & Relationships, Health & Self-Care, Finances, Community, etc.). Which of these areas would you like to focus on? You can also add your own.";

/// Sent on the user's behalf to wrap the interview up
pub const FINISH_MESSAGE: &str =
    "I think that covers everything. Can you create my final interview summary so I can finish onboarding?";

/// Quick action for adding one more life area
pub const ADD_AREA_MESSAGE: &str = "I'd like to add another life area";

/// A line of the on-screen conversation, including failures that never reach the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedMessage {
    pub role: Role,
    pub content: String,
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

impl DisplayedMessage {
    fn new(role: Role, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            role,
            content: content.into(),
            is_error,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of one user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The assistant answered
    Assistant(String),
    /// The request failed; the text is for display only
    Error(String),
    /// Blank input, or the interview is already over
    Ignored,
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Assistant(text) | Reply::Error(text) => Some(text),
            Reply::Ignored => None,
        }
    }
}

/// Finished interview, ready to classify and persist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub session_id: Uuid,
    pub user_id: String,
    pub responses: Vec<ConversationTurn>,
    pub completed_at: DateTime<Utc>,
    pub final_summary: Option<String>,
}

impl InterviewRecord {
    pub fn classify(&self, options: &SplitOptions) -> ClassificationResult {
        ResponseClassifier::new(*options).classify(&self.responses)
    }
}

/// One user's conversation with the onboarding assistant
pub struct Interview {
    chat: Arc<dyn ChatClient>,
    user_id: String,
    session_id: Uuid,
    transcript: Transcript,
    displayed: Vec<DisplayedMessage>,
    timeout: Duration,
    started: bool,
    complete: bool,
    completed_at: Option<DateTime<Utc>>,
}

impl Interview {
    pub fn new(chat: Arc<dyn ChatClient>, user_id: impl Into<String>, timeout: Duration) -> Self {
        let user_id = user_id.into();
        let session_id = Uuid::now_v7();
        debug!(%user_id, %session_id, ?timeout, "Interview::new: called");
        Self {
            chat,
            user_id,
            session_id,
            transcript: Transcript::new(),
            displayed: Vec::new(),
            timeout,
            started: false,
            complete: false,
            completed_at: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn displayed(&self) -> &[DisplayedMessage] {
        &self.displayed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Open the conversation. Returns the greeting, or `None` if already started.
    pub async fn start(&mut self) -> Option<String> {
        debug!(%self.user_id, "start: called");
        if self.started {
            debug!("start: already started");
            return None;
        }
        self.started = true;

        let greeting = match self.call(START_MESSAGE.to_string()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "start: chat unavailable, using fallback greeting");
                WELCOME_FALLBACK.to_string()
            }
        };

        self.transcript.push_assistant(greeting.clone());
        self.displayed
            .push(DisplayedMessage::new(Role::Assistant, greeting.clone(), false));
        Some(greeting)
    }

    /// Send one user message and record the exchange
    pub async fn send(&mut self, input: &str) -> Reply {
        debug!(%self.user_id, input_len = %input.len(), "send: called");
        let input = input.trim();
        if input.is_empty() {
            debug!("send: blank input");
            return Reply::Ignored;
        }
        if self.complete {
            debug!("send: interview already complete");
            return Reply::Ignored;
        }

        let turn = self.transcript.push_user(input);
        debug!(question_type = ?turn.question_type, "send: recorded user turn");
        self.displayed.push(DisplayedMessage::new(Role::User, input, false));

        match self.call(input.to_string()).await {
            Ok(text) => {
                self.transcript.push_assistant(text.clone());
                self.displayed
                    .push(DisplayedMessage::new(Role::Assistant, text.clone(), false));
                if is_completion_request(input) {
                    info!(%self.user_id, "send: user asked to finish");
                    self.mark_complete();
                }
                Reply::Assistant(text)
            }
            Err(e) => {
                warn!(error = %e, "send: chat request failed");
                let text = e.user_message();
                self.displayed
                    .push(DisplayedMessage::new(Role::Assistant, text.clone(), true));
                Reply::Error(text)
            }
        }
    }

    /// Ask for the final summary and end the interview whatever the reply
    pub async fn finish(&mut self) -> Reply {
        debug!(%self.user_id, "finish: called");
        if self.complete {
            return Reply::Ignored;
        }
        let reply = self.send(FINISH_MESSAGE).await;
        self.mark_complete();
        reply
    }

    pub async fn add_area(&mut self) -> Reply {
        debug!(%self.user_id, "add_area: called");
        self.send(ADD_AREA_MESSAGE).await
    }

    /// Classify what has been said so far
    pub fn classify(&self, options: &SplitOptions) -> ClassificationResult {
        ResponseClassifier::new(*options).classify(self.transcript.turns())
    }

    pub fn into_record(self) -> InterviewRecord {
        debug!(%self.user_id, turns = %self.transcript.len(), "into_record: called");
        let final_summary = self.transcript.last_assistant_message().map(str::to_string);
        InterviewRecord {
            session_id: self.session_id,
            user_id: self.user_id,
            completed_at: self.completed_at.unwrap_or_else(Utc::now),
            final_summary,
            responses: self.transcript.into_turns(),
        }
    }

    fn mark_complete(&mut self) {
        if !self.complete {
            self.complete = true;
            self.completed_at = Some(Utc::now());
            info!(%self.user_id, %self.session_id, "Interview complete");
        }
    }

    async fn call(&self, message: String) -> Result<String, ChatError> {
        let request = ChatRequest::new(self.user_id.clone(), message, self.transcript.turns());
        match tokio::time::timeout(self.timeout, self.chat.send(request)).await {
            Ok(result) => result.map(|r| r.response),
            Err(_) => {
                debug!(?self.timeout, "call: timed out");
                Err(ChatError::Timeout(self.timeout))
            }
        }
    }
}
