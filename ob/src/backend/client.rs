//! BackendApi trait definition

use async_trait::async_trait;
use interviewclassifier::Category;

use super::{ApiError, ItemRecord, NewProfile, OnboardingReset, OnboardingStepUpdate, Profile, ProfileUpdate};

/// Remote persistence operations used by onboarding and admin
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `Ok(None)` when the user has no profile yet
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError>;

    async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError>;

    /// Fails with `ApiError::NotFound` when there is no profile to update
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<(), ApiError>;

    async fn delete_profile(&self, user_id: &str) -> Result<(), ApiError>;

    async fn update_onboarding_step(&self, user_id: &str, update: &OnboardingStepUpdate) -> Result<(), ApiError>;

    async fn reset_onboarding(&self, user_id: &str, reset: &OnboardingReset) -> Result<(), ApiError>;

    async fn create_item(&self, category: Category, item: &ItemRecord) -> Result<(), ApiError>;

    /// Remove every record of one category for a user
    async fn delete_items(&self, category: Category, user_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use serde::Serialize;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tracing::debug;

    /// One recorded request
    #[derive(Debug, Clone)]
    pub struct BackendCall {
        pub method: &'static str,
        pub path: String,
        pub body: Value,
    }

    /// In-memory backend that records every call
    #[derive(Default)]
    pub struct MockBackend {
        profiles: Mutex<HashMap<String, Profile>>,
        failures: Mutex<HashMap<String, u16>>,
        calls: Mutex<Vec<BackendCall>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Start with a stored profile for `user_id`
        pub fn with_profile(self, user_id: &str) -> Self {
            let profile = Profile {
                user_id: Some(user_id.to_string()),
                ..Default::default()
            };
            self.profiles.lock().unwrap().insert(user_id.to_string(), profile);
            self
        }

        /// Make `"{METHOD} {path}"` answer with `status`
        pub fn failing(self, request: &str, status: u16) -> Self {
            self.failures.lock().unwrap().insert(request.to_string(), status);
            self
        }

        pub fn calls(&self) -> Vec<BackendCall> {
            self.calls.lock().unwrap().clone()
        }

        /// Requests as `"{METHOD} {path}"`, in order
        pub fn requests(&self) -> Vec<String> {
            self.calls().iter().map(|c| format!("{} {}", c.method, c.path)).collect()
        }

        pub fn body_of(&self, request: &str) -> Option<Value> {
            self.calls()
                .into_iter()
                .find(|c| format!("{} {}", c.method, c.path) == request)
                .map(|c| c.body)
        }

        fn record(&self, method: &'static str, path: String, body: impl Serialize) -> Result<(), ApiError> {
            debug!(%method, %path, "MockBackend::record: called");
            let body = serde_json::to_value(body)?;
            let key = format!("{} {}", method, path);
            self.calls.lock().unwrap().push(BackendCall { method, path, body });
            match self.failures.lock().unwrap().get(&key) {
                Some(404) => Err(ApiError::NotFound(key)),
                Some(status) => Err(ApiError::Status {
                    status: *status,
                    message: "mock failure".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl BackendApi for MockBackend {
        async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
            self.record("GET", format!("/profiles/{}", user_id), Value::Null)?;
            Ok(self.profiles.lock().unwrap().get(user_id).cloned())
        }

        async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError> {
            self.record("POST", "/profiles".to_string(), profile)?;
            let stored = Profile {
                user_id: Some(profile.user_id.clone()),
                onboarding_completed: profile.onboarding_completed,
                first_run: profile.first_run,
                ..Default::default()
            };
            self.profiles.lock().unwrap().insert(profile.user_id.clone(), stored);
            Ok(())
        }

        async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<(), ApiError> {
            let path = format!("/profiles/{}", user_id);
            self.record("PUT", path.clone(), update)?;
            let mut profiles = self.profiles.lock().unwrap();
            let Some(profile) = profiles.get_mut(user_id) else {
                return Err(ApiError::NotFound(path));
            };
            if let Some(done) = update.onboarding_completed {
                profile.onboarding_completed = done;
            }
            if let Some(first_run) = update.first_run {
                profile.first_run = first_run;
            }
            Ok(())
        }

        async fn delete_profile(&self, user_id: &str) -> Result<(), ApiError> {
            let path = format!("/profiles/{}", user_id);
            self.record("DELETE", path.clone(), Value::Null)?;
            match self.profiles.lock().unwrap().remove(user_id) {
                Some(_) => Ok(()),
                None => Err(ApiError::NotFound(path)),
            }
        }

        async fn update_onboarding_step(&self, user_id: &str, update: &OnboardingStepUpdate) -> Result<(), ApiError> {
            self.record("PUT", format!("/onboarding/{}/step", user_id), update)
        }

        async fn reset_onboarding(&self, user_id: &str, reset: &OnboardingReset) -> Result<(), ApiError> {
            self.record("PUT", format!("/onboarding/{}", user_id), reset)
        }

        async fn create_item(&self, category: Category, item: &ItemRecord) -> Result<(), ApiError> {
            self.record("POST", format!("/{}", category.endpoint()), item)
        }

        async fn delete_items(&self, category: Category, user_id: &str) -> Result<(), ApiError> {
            self.record(
                "DELETE",
                format!("/{}?user_id={}", category.endpoint(), user_id),
                Value::Null,
            )
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_update_missing_profile_is_not_found() {
            let backend = MockBackend::new();
            let err = backend
                .update_profile("c9x", &ProfileUpdate::first_run())
                .await
                .unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(backend.requests(), vec!["PUT /profiles/c9x"]);
        }

        #[tokio::test]
        async fn test_mock_scripted_failure() {
            let backend = MockBackend::new().failing("DELETE /habits?user_id=c9x", 500);
            assert!(backend.delete_items(Category::Habit, "c9x").await.is_err());
            assert!(backend.delete_items(Category::Project, "c9x").await.is_ok());
        }
    }
}
