//! Persisting a finished interview

use interviewclassifier::ClassificationResult;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Account, ProfileForm};
use crate::backend::{
    ApiError, BackendApi, InterviewData, ItemRecord, NewProfile, OnboardingInterviewData, OnboardingStepUpdate,
    ProfileUpdate,
};
use crate::interview::InterviewRecord;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to save profile: {0}")]
    Profile(#[source] ApiError),

    #[error("Failed to save onboarding completion: {0}")]
    OnboardingStatus(#[source] ApiError),
}

/// What `save_interview` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// The profile did not exist and was created
    pub profile_created: bool,
    pub items_created: usize,
    pub items_failed: usize,
}

/// Store the interview on the profile, mark onboarding complete, then create
/// one record per extracted item when `create_items` is set.
///
/// Profile and onboarding-status failures abort. Item failures are counted.
pub async fn save_interview(
    backend: &dyn BackendApi,
    account: &Account,
    profile: Option<&ProfileForm>,
    record: &InterviewRecord,
    result: &ClassificationResult,
    create_items: bool,
) -> Result<SaveReport, SaveError> {
    let user_id = account.local_account_id.as_str();
    debug!(%user_id, items = %result.item_count(), %create_items, "save_interview: called");
    let mut report = SaveReport::default();

    let interview_data = InterviewData {
        raw_responses: record.responses.clone(),
        final_summary: record.final_summary.clone(),
        parsed_items: result.clone(),
        completed_at: record.completed_at,
    };

    let update = ProfileUpdate::completed(result, interview_data.clone());
    match backend.update_profile(user_id, &update).await {
        Ok(()) => debug!("save_interview: profile updated"),
        Err(e) if e.is_not_found() => {
            info!(%user_id, "Profile not found, creating new profile");
            let new_profile = NewProfile {
                user_id: user_id.to_string(),
                display_name: profile
                    .map(|p| p.display_name.clone())
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| account.display_name().to_string()),
                email: profile
                    .map(|p| p.email.clone())
                    .filter(|e| !e.trim().is_empty())
                    .or_else(|| account.username.clone())
                    .unwrap_or_default(),
                onboarding_completed: true,
                first_run: true,
                primary_life_areas: result.life_areas.clone(),
                life_area_priorities: result.life_area_priorities(),
                interview_data: Some(interview_data),
            };
            backend.create_profile(&new_profile).await.map_err(SaveError::Profile)?;
            report.profile_created = true;
        }
        Err(e) => return Err(SaveError::Profile(e)),
    }

    let step = OnboardingStepUpdate::completed(OnboardingInterviewData {
        responses: record.responses.clone(),
        final_summary: record.final_summary.clone(),
        parsed_items: result.clone(),
        completed_at: record.completed_at,
        life_areas: result.life_areas.clone(),
        primary_goals: result.primary_goals().into_iter().cloned().collect(),
        welcome_shown: false,
        profile_setup: profile.cloned(),
    });
    backend
        .update_onboarding_step(user_id, &step)
        .await
        .map_err(SaveError::OnboardingStatus)?;
    info!(%user_id, "Onboarding marked complete");

    if create_items {
        for item in result.items() {
            let body = ItemRecord::from_item(user_id, item);
            match backend.create_item(item.category, &body).await {
                Ok(()) => report.items_created += 1,
                Err(e) => {
                    warn!(endpoint = %item.category.endpoint(), title = %item.title, error = %e, "Failed to save item");
                    report.items_failed += 1;
                }
            }
        }
        info!(created = %report.items_created, failed = %report.items_failed, "Saved interview items");
    } else {
        debug!("save_interview: item creation disabled");
    }

    Ok(report)
}
