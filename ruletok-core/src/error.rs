//! Error types for profile loading and tokenization

use ruletok_annotate::AnnotateError;
use thiserror::Error;

/// Errors raised while building profiles or tokenizing text
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// No profile is registered for the requested language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No class definition or rule matches a candidate string
    #[error("could not find class for {0}")]
    UnclassifiableToken(String),

    /// A class name is not part of the profile's hierarchy
    #[error("undefined token class tag {0}")]
    UndefinedClassTag(String),

    /// Profile configuration loading or validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A configured pattern does not compile
    #[error("Invalid pattern '{name}': {source}")]
    InvalidPattern {
        /// Name of the definition or rule carrying the pattern
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Annotation store precondition violation
    #[error("annotation error: {0}")]
    Annotation(#[from] AnnotateError),
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;
