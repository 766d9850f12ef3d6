//! Splitting a free-text reply into discrete items

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::RawItem;

/// Separators between items in a reply
const SEPARATORS: &[char] = &[',', ';', '.', '\n'];

/// Trailing punctuation stripped from a fragment
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';'];

/// Options for splitting a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SplitOptions {
    /// Items beyond this many are discarded
    pub max_items: usize,
    /// Title length cap in characters
    pub max_title_chars: usize,
    /// Fragments of this many characters or fewer are dropped
    pub min_fragment_chars: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_items: crate::DEFAULT_MAX_ITEMS,
            max_title_chars: crate::DEFAULT_MAX_TITLE_CHARS,
            min_fragment_chars: crate::DEFAULT_MIN_FRAGMENT_CHARS,
        }
    }
}

/// Split a reply using the default options
pub fn split(utterance: &str) -> Vec<RawItem> {
    split_with(utterance, &SplitOptions::default())
}

/// Split a reply on commas, semicolons, periods and newlines.
///
/// At most one trailing `. , : ;` is stripped per fragment, so `"Goals::"` keeps
/// one colon.
pub fn split_with(utterance: &str, options: &SplitOptions) -> Vec<RawItem> {
    let items: Vec<RawItem> = utterance
        .split(SEPARATORS)
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > options.min_fragment_chars)
        .map(|fragment| fragment.strip_suffix(TRAILING_PUNCTUATION).unwrap_or(fragment).trim())
        .filter(|cleaned| cleaned.chars().count() > options.min_fragment_chars)
        .take(options.max_items)
        .map(|cleaned| RawItem {
            title: cleaned.chars().take(options.max_title_chars).collect(),
            description: cleaned.to_string(),
        })
        .collect();

    debug!("split: {} item(s) from {} chars", items.len(), utterance.chars().count());
    items
}
