//! Chat collaborator client
//!
//! The interview conversation is driven by a remote chat service. Every call
//! carries the full conversation history, so the client itself holds no state.

pub mod client;
mod error;
mod http;
mod types;

pub use client::ChatClient;
pub use error::ChatError;
pub use http::HttpChatClient;
pub use types::{ChatRequest, ChatResponse};
