//! Six-pass segmentation pipeline
//!
//! Every pass rewrites the class channel (or, for the last pass, the border
//! channel) of one [`AnnotatedText`] in place:
//!
//! 1. whitespace tokenization
//! 2. punctuation splitting
//! 3. clitic splitting
//! 4. number recognition
//! 5. abbreviation recognition
//! 6. text unit and paragraph boundaries
//!
//! Passes 2 to 5 only look at tokens that still carry the root class.

pub mod abbreviations;
pub mod boundaries;
pub mod clitics;
pub mod numbers;
pub mod punctuation;
pub mod whitespace;

use ruletok_annotate::AnnotatedText;

use crate::error::Result;
use crate::profile::{ClassId, LanguageProfile};

/// Annotated text as produced by the pipeline
pub type Annotated = AnnotatedText<ClassId>;

/// Run all passes over `text`
pub fn run(text: &str, profile: &LanguageProfile) -> Result<Annotated> {
    let mut annotated = Annotated::new(text);

    let count = whitespace::identify_tokens(&mut annotated, profile)?;
    log::debug!("whitespace pass: {count} tokens");
    let count = punctuation::identify_punct(&mut annotated, profile)?;
    log::debug!("punctuation pass: {count} tokens split");
    let count = clitics::identify_clitics(&mut annotated, profile)?;
    log::debug!("clitics pass: {count} clitics");
    let count = numbers::identify_numbers(&mut annotated, profile)?;
    log::debug!("numbers pass: {count} numbers");
    let count = abbreviations::identify_abbreviations(&mut annotated, profile)?;
    log::debug!("abbreviations pass: {count} abbreviations");
    let count = boundaries::identify_text_units(&mut annotated, profile)?;
    log::debug!("boundaries pass: {count} borders");

    Ok(annotated)
}

/// A root-classed token handed to a pass
pub(crate) struct TokenSpan {
    pub start: usize,
    pub end: usize,
    pub class: ClassId,
    pub chars: Vec<char>,
}

impl TokenSpan {
    /// Token text
    pub fn image(&self) -> String {
        self.chars.iter().collect()
    }

    /// Token text of the relative range `[begin, end)`
    pub fn slice(&self, begin: usize, end: usize) -> String {
        self.chars[begin..end].iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }
}

/// Visit every token carrying `class`, in text order
///
/// The position of the following token is taken before `visit` runs, so a
/// visitor may freely re-annotate inside its own span.
pub(crate) fn for_each_token(
    text: &mut Annotated,
    class: ClassId,
    mut visit: impl FnMut(&mut Annotated, TokenSpan) -> Result<()>,
) -> Result<()> {
    let len = text.len();
    let mut pos = if text.class().value_at(0).is_some() {
        0
    } else {
        text.class().find_next_annotated(0)
    };

    while pos < len {
        let end = text.class().run_limit(pos);
        let next = text.class().find_next_annotated(pos);
        if text.class().value_at(pos) == Some(class) {
            let chars = text.buffer().slice(pos, end)?.to_vec();
            visit(
                text,
                TokenSpan {
                    start: pos,
                    end,
                    class,
                    chars,
                },
            )?;
        }
        pos = next;
    }
    Ok(())
}
