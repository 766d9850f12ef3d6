//! Onboarding: the linear signup flow around the interview

mod flow;
mod profile;
mod save;
mod steps;
mod summary;

pub use flow::{OnboardingFlow, print_plans, print_result, run_interview, run_onboarding};
pub use profile::{Account, AccountType, Plan, ProfileForm, ROLES, TERMS_TEXT, UsageAgreement};
pub use save::{SaveError, SaveReport, save_interview};
pub use steps::OnboardingStep;
pub use summary::render_summary;
