//! Annotation store errors (deterministic only)

use std::fmt;

/// Precondition violations rejected by the store before any mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    /// Range is empty, reversed, or reaches past the end of the text
    InvalidRange {
        /// First position of the rejected range
        begin: usize,
        /// Exclusive end of the rejected range
        end: usize,
        /// Length of the text buffer
        len: usize,
    },
    /// Position lies beyond the end-of-text sentinel
    InvalidIndex {
        /// The rejected position
        index: usize,
        /// Length of the text buffer
        len: usize,
    },
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::InvalidRange { begin, end, len } => {
                write!(f, "invalid range {begin}..{end} for text of length {len}")
            }
            AnnotateError::InvalidIndex { index, len } => {
                write!(f, "invalid index {index} for text of length {len}")
            }
        }
    }
}

impl std::error::Error for AnnotateError {}

/// Result type for annotation store operations
pub type Result<T> = std::result::Result<T, AnnotateError>;
