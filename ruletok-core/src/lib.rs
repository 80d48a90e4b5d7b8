//! Rule-driven tokenization and segmentation
//!
//! Text is split into classified tokens, text units (sentences) and
//! paragraphs by six passes over an [`ruletok_annotate::AnnotatedText`]:
//! whitespace, punctuation, clitics, numbers, abbreviations and boundaries.
//! What counts as punctuation, an abbreviation or a sentence-initial term is
//! entirely defined by a [`LanguageProfile`], loaded from TOML.
//!
//! # Example
//!
//! ```rust
//! use ruletok_core::Tokenizer;
//!
//! let tokenizer = Tokenizer::new().unwrap();
//! let result = tokenizer.tokenize("Mr. Smith left. He was late.", "en").unwrap();
//!
//! let units = result.text_units();
//! assert_eq!(units.len(), 2);
//! assert_eq!(units[0][0].image, "Mr.");
//! assert_eq!(result.class_name(units[0][0].class), "TITLE");
//! ```

pub mod error;
pub mod output;
pub mod pattern;
pub mod pipeline;
pub mod profile;
pub mod tokenizer;

pub use error::{Result, TokenizerError};
pub use output::{Token, TokenizedText};
pub use pattern::{Match, PatternMatcher, RegexMatcher};
pub use profile::{
    list_available_languages, ClassId, LanguageProfile, ProfileConfig, Rule, Section,
    TokenClasses,
};
pub use ruletok_annotate::Border;
pub use tokenizer::Tokenizer;
