//! ChatClient trait definition

use async_trait::async_trait;

use super::{ChatError, ChatRequest, ChatResponse};

/// One request, one reply. History travels in the request.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, ChatError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::debug;

    /// Scripted reply for the mock
    pub enum MockReply {
        Text(String),
        Fail(u16),
        Hang(Duration),
    }

    /// Mock chat client for unit tests
    pub struct MockChatClient {
        replies: Vec<MockReply>,
        call_count: AtomicUsize,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockChatClient {
        pub fn new(replies: Vec<MockReply>) -> Self {
            debug!(reply_count = %replies.len(), "MockChatClient::new: called");
            Self {
                replies,
                call_count: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn texts(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| MockReply::Text(r.to_string())).collect())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Every request received so far
        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatClient for MockChatClient {
        async fn send(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
            debug!("MockChatClient::send: called");
            self.requests.lock().unwrap().push(request);
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.replies.get(idx) {
                Some(MockReply::Text(text)) => Ok(ChatResponse { response: text.clone() }),
                Some(MockReply::Fail(status)) => Err(ChatError::ApiError {
                    status: *status,
                    message: "mock failure".to_string(),
                }),
                Some(MockReply::Hang(delay)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(ChatResponse {
                        response: "too late".to_string(),
                    })
                }
                None => {
                    debug!("MockChatClient::send: no more mock replies");
                    Err(ChatError::InvalidResponse("No more mock replies".to_string()))
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockChatClient::texts(&["one", "two"]);

            let first = client.send(ChatRequest::new("u", "a", &[])).await.unwrap();
            let second = client.send(ChatRequest::new("u", "b", &[])).await.unwrap();

            assert_eq!(first.response, "one");
            assert_eq!(second.response, "two");
            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests()[1].message, "b");
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockChatClient::new(vec![]);
            assert!(client.send(ChatRequest::new("u", "a", &[])).await.is_err());
        }
    }
}
