//! onboard - 1TaskAssistant onboarding
//!
//! Walks a new user through profile setup, plan choice and terms, then runs
//! a chat interview. The interview transcript is classified into life areas,
//! goals, habits and projects and saved to the backend.
//!
//! # Modules
//!
//! - [`config`] - Configuration types and loading
//! - [`chat`] - Chat service client that drives the interview
//! - [`backend`] - Persistence API client
//! - [`interview`] - Interview session and terminal front end
//! - [`onboarding`] - Steps, profile form, saving and the completion summary
//! - [`admin`] - Support tools for resetting a user's data
//! - [`cli`] - Command-line interface

pub mod admin;
pub mod backend;
pub mod chat;
pub mod cli;
pub mod config;
pub mod interview;
pub mod onboarding;

pub use admin::Admin;
pub use backend::{ApiError, BackendApi, HttpBackend};
pub use chat::{ChatClient, ChatError, HttpChatClient};
pub use config::Config;
pub use interview::{Interview, InterviewRecord, InterviewRepl};
pub use onboarding::{Account, OnboardingStep, ProfileForm, save_interview};
