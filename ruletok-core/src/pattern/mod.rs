//! Pattern matching capability consumed by the pipeline
//!
//! All offsets reported by a [`PatternMatcher`] are character offsets into
//! the searched string, never byte offsets, so they can be added directly
//! to positions in the annotation store.

mod regex_matcher;

pub use regex_matcher::RegexMatcher;

use smallvec::SmallVec;

/// One match of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Character offset of the first matched character
    pub start: usize,
    /// Exclusive character offset of the match end
    pub end: usize,
    /// Matched text
    pub image: String,
}

impl Match {
    /// Number of matched characters
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Matches found in one token; tokens rarely hold more than a few
pub type Matches = SmallVec<[Match; 4]>;

/// Matching operations the pipeline needs from a compiled pattern
pub trait PatternMatcher: Send + Sync {
    /// Whether the pattern matches the whole text
    fn matches_entire(&self, text: &str) -> bool;

    /// Leftmost, non-overlapping, non-empty matches in text order
    fn all_matches(&self, text: &str) -> Matches;

    /// First non-empty match anywhere in the text
    fn first_match_anywhere(&self, text: &str) -> Option<Match>;

    /// Non-empty match starting at offset 0
    fn first_match_at_start(&self, text: &str) -> Option<Match>;

    /// Leftmost-starting non-empty match that ends at the end of the text
    fn first_match_at_end(&self, text: &str) -> Option<Match>;
}
