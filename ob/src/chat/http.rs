//! HTTP chat client
//!
//! Posts to the onboarding endpoint with a client-level timeout. Failed
//! requests are surfaced to the caller as-is; the user resends by hand.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{ChatClient, ChatError, ChatRequest, ChatResponse};
use crate::config::ChatConfig;

/// reqwest-backed chat client
pub struct HttpChatClient {
    endpoint: String,
    http: Client,
    timeout: Duration,
}

impl HttpChatClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        debug!(?config, "from_config: called");
        let timeout = config.timeout();
        let http = Client::builder().timeout(timeout).build().map_err(ChatError::Network)?;

        Ok(Self {
            endpoint: config.endpoint(),
            http,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        debug!(
            %self.endpoint,
            history_len = %request.conversation_history.len(),
            "send: called"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("send: timed out");
                    ChatError::Timeout(self.timeout)
                } else {
                    debug!(error = %e, "send: network error");
                    ChatError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "send: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::ApiError { status, message: text });
        }

        let body = response.text().await.map_err(ChatError::Network)?;
        let reply: ChatResponse = serde_json::from_str(&body)?;
        if reply.response.trim().is_empty() {
            debug!("send: empty response field");
            return Err(ChatError::InvalidResponse("empty response".to_string()));
        }

        debug!("send: success");
        Ok(reply)
    }
}
