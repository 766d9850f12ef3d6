//! InterviewClassifier - best-effort extraction of goals from an onboarding chat
//!
//! Takes the transcript of an onboarding interview (assistant questions and
//! free-text user replies) and buckets each reply into yearly goals,
//! quarterly goals, habits or projects, tagged with the life area the user was
//! talking about at the time.
//!
//! # Data flow
//!
//! ```text
//! assistant turn ──► detector ──► question type stamped on the next user turn
//! user turn      ──► splitter ──► raw items (title, description)
//! raw items      ──► classifier ──► ClassificationResult
//! ```
//!
//! Everything here is pure and synchronous. Classification never fails: a
//! malformed or empty transcript degrades to [`ClassificationResult::default`].
//!
//! # Example
//!
//! ```ignore
//! use interviewclassifier::{ResponseClassifier, Transcript};
//!
//! let mut transcript = Transcript::new();
//! transcript.push_assistant("What are your big goals this year?");
//! transcript.push_user("Run a marathon, read 12 books");
//! let result = ResponseClassifier::default().classify(transcript.turns());
//! assert_eq!(result.yearly_goals.len(), 2);
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod detector;
pub mod splitter;
pub mod transcript;
mod types;

pub use classifier::{ResponseClassifier, is_completion_request, is_control_utterance};
pub use detector::{QuestionTypeDetector, detect};
pub use splitter::{SplitOptions, split, split_with};
pub use transcript::Transcript;
pub use types::{Category, ClassificationResult, ConversationTurn, Item, LifeArea, QuestionType, RawItem, Role};

/// Maximum number of items taken from a single reply
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Maximum title length in characters
pub const DEFAULT_MAX_TITLE_CHARS: usize = 100;

/// Fragments this short (or shorter) are noise, not items
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 3;
