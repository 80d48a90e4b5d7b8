//! Token view over a segmented text

use std::fmt;
use std::sync::Arc;

use ruletok_annotate::Border;

use crate::pipeline::Annotated;
use crate::profile::{ClassId, LanguageProfile};

/// One token of a segmented text
///
/// Offsets are character offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub image: String,
    pub class: ClassId,
    /// Set when a text unit or paragraph starts at this token
    pub border: Option<Border>,
}

/// Result of tokenizing one text
#[derive(Debug, Clone)]
pub struct TokenizedText {
    annotated: Annotated,
    profile: Arc<LanguageProfile>,
}

impl TokenizedText {
    pub(crate) fn new(annotated: Annotated, profile: Arc<LanguageProfile>) -> Self {
        Self { annotated, profile }
    }

    /// The underlying annotated text
    pub fn annotated(&self) -> &Annotated {
        &self.annotated
    }

    /// Profile the text was tokenized with
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Name of a token class
    pub fn class_name(&self, class: ClassId) -> &str {
        self.profile.classes().name(class)
    }

    /// Tokens in text order
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        let border = self.annotated.border();
        self.annotated.class().annotated_runs().filter_map(move |run| {
            let class = run.value?;
            let image = self.annotated.substring(run.start, run.end).ok()?;
            Some(Token {
                start: run.start,
                end: run.end,
                image,
                class,
                border: border.value_at(run.start),
            })
        })
    }

    /// Token lists grouped by text unit
    ///
    /// A unit starts at every token carrying a border, whatever its kind.
    pub fn text_units(&self) -> Vec<Vec<Token>> {
        let mut units: Vec<Vec<Token>> = Vec::new();
        for token in self.tokens() {
            match units.last_mut() {
                Some(unit) if token.border.is_none() => unit.push(token),
                _ => units.push(vec![token]),
            }
        }
        units
    }

    /// Token lists grouped by paragraph
    pub fn paragraphs(&self) -> Vec<Vec<Token>> {
        let mut paragraphs: Vec<Vec<Token>> = Vec::new();
        for token in self.tokens() {
            match paragraphs.last_mut() {
                Some(paragraph) if token.border != Some(Border::Paragraph) => {
                    paragraph.push(token)
                }
                _ => paragraphs.push(vec![token]),
            }
        }
        paragraphs
    }
}

impl fmt::Display for TokenizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            writeln!(
                f,
                "{}\t{}-{}\t{}",
                token.image,
                token.start,
                token.end,
                self.class_name(token.class)
            )?;
        }
        Ok(())
    }
}
