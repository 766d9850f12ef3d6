//! Persistence collaborator client
//!
//! Profiles, onboarding status and the per-category item collections all
//! live behind one REST API rooted at `backend.base-url`.

pub mod client;
mod error;
mod http;
mod types;

pub use client::BackendApi;
pub use error::ApiError;
pub use http::HttpBackend;
pub use types::{
    InterviewData, ItemRecord, ItemStatus, NewProfile, OnboardingInterviewData, OnboardingReset,
    OnboardingStepUpdate, Priority, Profile, ProfileUpdate,
};
