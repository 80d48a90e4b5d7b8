//! Language registry and tokenization entry point

use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, TokenizerError};
use crate::output::TokenizedText;
use crate::pipeline;
use crate::profile::{list_available_languages, LanguageProfile};

/// Tokenizer holding one compiled profile per language
///
/// Profiles are immutable once registered, so a `Tokenizer` can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    profiles: HashMap<String, Arc<LanguageProfile>>,
}

impl Tokenizer {
    /// Create a tokenizer with every embedded profile
    pub fn new() -> Result<Self> {
        let mut tokenizer = Self::empty();
        for code in list_available_languages() {
            tokenizer.register(LanguageProfile::from_code(code)?);
        }
        Ok(tokenizer)
    }

    /// Create a tokenizer without any profile
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace the profile for its language code
    pub fn register(&mut self, profile: LanguageProfile) {
        if self.profiles.contains_key(profile.code()) {
            log::info!("Replacing profile for language '{}'", profile.code());
        }
        self.profiles
            .insert(profile.code().to_string(), Arc::new(profile));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_profile(mut self, profile: LanguageProfile) -> Self {
        self.register(profile);
        self
    }

    /// Registered language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Profile registered for `lang`
    pub fn profile(&self, lang: &str) -> Result<Arc<LanguageProfile>> {
        self.profiles
            .get(lang)
            .cloned()
            .ok_or_else(|| TokenizerError::UnsupportedLanguage(lang.to_string()))
    }

    /// Segment `text` into tokens, text units and paragraphs
    pub fn tokenize(&self, text: &str, lang: &str) -> Result<TokenizedText> {
        let profile = self.profile(lang)?;
        log::debug!("Tokenizing {} bytes with profile '{}'", text.len(), lang);
        let annotated = pipeline::run(text, &profile)?;
        Ok(TokenizedText::new(annotated, profile))
    }

    /// Tokenize several independent texts
    ///
    /// Results are returned in input order. The first error aborts the batch.
    #[cfg(feature = "parallel")]
    pub fn tokenize_batch(&self, texts: &[&str], lang: &str) -> Result<Vec<TokenizedText>> {
        let profile = self.profile(lang)?;
        log::debug!("Tokenizing batch of {} texts in parallel", texts.len());
        texts
            .par_iter()
            .map(|text| {
                let annotated = pipeline::run(text, &profile)?;
                Ok(TokenizedText::new(annotated, Arc::clone(&profile)))
            })
            .collect()
    }

    /// Tokenize several independent texts
    ///
    /// Results are returned in input order. The first error aborts the batch.
    #[cfg(not(feature = "parallel"))]
    pub fn tokenize_batch(&self, texts: &[&str], lang: &str) -> Result<Vec<TokenizedText>> {
        texts.iter().map(|text| self.tokenize(text, lang)).collect()
    }

    /// Name-based ancestor-or-self query in the hierarchy of `lang`
    pub fn is_ancestor(&self, tag1: &str, tag2: &str, lang: &str) -> Result<bool> {
        self.profile(lang)?.is_ancestor(tag1, tag2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_languages() {
        let tokenizer = Tokenizer::new().unwrap();
        assert_eq!(tokenizer.languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_unsupported_language() {
        let tokenizer = Tokenizer::new().unwrap();
        let err = tokenizer.tokenize("text", "xx").unwrap_err();
        assert!(matches!(err, TokenizerError::UnsupportedLanguage(code) if code == "xx"));
        assert!(Tokenizer::empty().tokenize("text", "en").is_err());
    }

    #[test]
    fn test_register_profile() {
        let profile = LanguageProfile::from_code("en").unwrap();
        let tokenizer = Tokenizer::empty().with_profile(profile);
        assert_eq!(tokenizer.languages(), vec!["en"]);
        assert!(tokenizer.tokenize("Hello.", "en").is_ok());
    }

    #[test]
    fn test_is_ancestor() {
        let tokenizer = Tokenizer::new().unwrap();
        assert!(tokenizer.is_ancestor("PUNCT", "PERIOD", "en").unwrap());
        assert!(tokenizer.is_ancestor("PERIOD", "PERIOD", "en").unwrap());
        assert!(!tokenizer.is_ancestor("PERIOD", "PUNCT", "en").unwrap());
        assert!(matches!(
            tokenizer.is_ancestor("NOPE", "PUNCT", "en"),
            Err(TokenizerError::UndefinedClassTag(_))
        ));
    }

    #[test]
    fn test_batch_keeps_order() {
        let tokenizer = Tokenizer::new().unwrap();
        let texts = ["One.", "Two words.", "Three small words."];
        let results = tokenizer.tokenize_batch(&texts, "en").unwrap();
        let counts: Vec<_> = results.iter().map(|r| r.tokens().count()).collect();
        assert_eq!(counts, vec![2, 3, 4]);
    }
}
