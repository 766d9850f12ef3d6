//! Support operations for resetting and inspecting a user's onboarding state

use std::sync::Arc;

use interviewclassifier::Category;
use tracing::{debug, info, warn};

use crate::backend::{ApiError, BackendApi, OnboardingReset, Profile, ProfileUpdate};

/// Prefix every identity-provider user id carries
pub const EXPECTED_USER_PREFIX: &str = "c9";

/// Whether `user_id` looks like a real account id: the expected prefix, then only
/// ASCII letters, digits, `_` or `-`
pub fn looks_like_user_id(user_id: &str) -> bool {
    user_id.starts_with(EXPECTED_USER_PREFIX)
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Per-category outcome of `reset_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub deleted: Vec<Category>,
    pub skipped: Vec<Category>,
}

/// Admin operations against the persistence API
pub struct Admin {
    backend: Arc<dyn BackendApi>,
}

impl Admin {
    pub fn new(backend: Arc<dyn BackendApi>) -> Self {
        Self { backend }
    }

    /// Re-arm the first-run flag so suggestions are generated again
    pub async fn reset_flag(&self, user_id: &str) -> Result<(), ApiError> {
        debug!(%user_id, "reset_flag: called");
        self.backend.update_profile(user_id, &ProfileUpdate::first_run()).await?;
        info!(%user_id, "First-run flag reset");
        Ok(())
    }

    /// Clear the stored interview and put onboarding back at the welcome step
    pub async fn reset_interview(&self, user_id: &str) -> Result<(), ApiError> {
        debug!(%user_id, "reset_interview: called");
        self.backend
            .update_profile(user_id, &ProfileUpdate::clear_interview())
            .await?;
        self.backend
            .reset_onboarding(user_id, &OnboardingReset::welcome())
            .await?;
        info!(%user_id, "Interview data reset");
        Ok(())
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        debug!(%user_id, "get_profile: called");
        self.backend.get_profile(user_id).await
    }

    pub async fn delete_profile(&self, user_id: &str) -> Result<(), ApiError> {
        debug!(%user_id, "delete_profile: called");
        self.backend.delete_profile(user_id).await?;
        info!(%user_id, "Profile deleted");
        Ok(())
    }

    /// `reset_interview`, then remove every goal, habit and project.
    /// A category with nothing to delete is skipped, not an error.
    pub async fn reset_all(&self, user_id: &str) -> Result<ResetReport, ApiError> {
        debug!(%user_id, "reset_all: called");
        self.reset_interview(user_id).await?;

        let mut report = ResetReport::default();
        for category in Category::ALL {
            match self.backend.delete_items(category, user_id).await {
                Ok(()) => {
                    debug!(endpoint = %category.endpoint(), "reset_all: deleted");
                    report.deleted.push(category);
                }
                Err(e) => {
                    warn!(endpoint = %category.endpoint(), error = %e, "reset_all: could not delete");
                    report.skipped.push(category);
                }
            }
        }
        info!(%user_id, deleted = %report.deleted.len(), skipped = %report.skipped.len(), "User data reset");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::mock::MockBackend;
    use serde_json::json;

    fn admin(backend: MockBackend) -> (Admin, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        (Admin::new(backend.clone()), backend)
    }

    #[test]
    fn test_user_id_prefix() {
        assert!(looks_like_user_id("c9f00ba4"));
        assert!(!looks_like_user_id("00000000-c9"));
        assert!(!looks_like_user_id(""));
    }

    #[test]
    fn test_user_id_with_path_characters_is_suspicious() {
        assert!(looks_like_user_id("c9f00ba4-11_x"));
        assert!(!looks_like_user_id("c9x/../../habits"));
        assert!(!looks_like_user_id("c9a&b#c"));
        assert!(!looks_like_user_id("c9 x"));
    }

    #[tokio::test]
    async fn test_reset_flag() {
        let (admin, backend) = admin(MockBackend::new().with_profile("c9abc"));

        admin.reset_flag("c9abc").await.unwrap();

        assert_eq!(backend.requests(), vec!["PUT /profiles/c9abc"]);
        assert_eq!(backend.body_of("PUT /profiles/c9abc").unwrap(), json!({"first_run": true}));
    }

    #[tokio::test]
    async fn test_reset_interview() {
        let (admin, backend) = admin(MockBackend::new().with_profile("c9abc"));

        admin.reset_interview("c9abc").await.unwrap();

        assert_eq!(backend.requests(), vec!["PUT /profiles/c9abc", "PUT /onboarding/c9abc"]);
        assert_eq!(
            backend.body_of("PUT /profiles/c9abc").unwrap(),
            json!({"onboarding_completed": false, "first_run": true, "interview_data": null})
        );
        assert_eq!(backend.body_of("PUT /onboarding/c9abc").unwrap()["current_step"], "welcome");
    }

    #[tokio::test]
    async fn test_reset_interview_without_profile_fails() {
        let (admin, backend) = admin(MockBackend::new());

        assert!(admin.reset_interview("c9abc").await.unwrap_err().is_not_found());
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_all_tolerates_missing_items() {
        let (admin, backend) = admin(
            MockBackend::new()
                .with_profile("c9abc")
                .failing("DELETE /habits?user_id=c9abc", 404),
        );

        let report = admin.reset_all("c9abc").await.unwrap();

        assert_eq!(report.deleted, vec![Category::YearlyGoal, Category::QuarterlyGoal, Category::Project]);
        assert_eq!(report.skipped, vec![Category::Habit]);
        assert_eq!(
            backend.requests()[2..].to_vec(),
            vec![
                "DELETE /yearly-goals?user_id=c9abc",
                "DELETE /quarterly-goals?user_id=c9abc",
                "DELETE /habits?user_id=c9abc",
                "DELETE /projects?user_id=c9abc",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_and_delete_profile() {
        let (admin, _) = admin(MockBackend::new().with_profile("c9abc"));

        assert!(admin.get_profile("c9abc").await.unwrap().is_some());
        admin.delete_profile("c9abc").await.unwrap();
        assert!(admin.get_profile("c9abc").await.unwrap().is_none());
        assert!(admin.delete_profile("c9abc").await.unwrap_err().is_not_found());
    }
}
