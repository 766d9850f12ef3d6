//! Onboarding steps

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a user is in onboarding. Strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    #[default]
    Signup,
    Profile,
    Agreement,
    Interview,
    Complete,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        Self::Signup,
        Self::Profile,
        Self::Agreement,
        Self::Interview,
        Self::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Profile => "profile",
            Self::Agreement => "agreement",
            Self::Interview => "interview",
            Self::Complete => "complete",
        }
    }

    /// Following step; `Complete` stays put
    pub fn next(&self) -> Self {
        match self {
            Self::Signup => Self::Profile,
            Self::Profile => Self::Agreement,
            Self::Agreement => Self::Interview,
            Self::Interview => Self::Complete,
            Self::Complete => Self::Complete,
        }
    }

    /// 1-based position, for "step 2 of 5" style display
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map(|i| i + 1).unwrap_or(1)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
