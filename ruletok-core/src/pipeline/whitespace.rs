//! Pass 1: whitespace tokenization

use super::Annotated;
use crate::error::Result;
use crate::profile::LanguageProfile;

/// Whitespace for tokenization purposes, including the no-break space
#[inline]
pub fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{a0}'
}

/// Annotate every maximal non-whitespace run with the root class
///
/// Returns the number of tokens found.
pub fn identify_tokens(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let root = profile.root();
    let mut spans = Vec::new();
    let mut token_start = None;

    let mut cursor = text.buffer().cursor();
    let mut current = cursor.first();
    while let Some(c) = current {
        match (is_token_separator(c), token_start) {
            (true, Some(start)) => {
                spans.push((start, cursor.index()));
                token_start = None;
            }
            (false, None) => token_start = Some(cursor.index()),
            _ => {}
        }
        current = cursor.next_char();
    }
    if let Some(start) = token_start {
        spans.push((start, text.len()));
    }

    for &(start, end) in &spans {
        text.annotate_class(root, start, end)?;
    }
    Ok(spans.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(input: &str) -> Vec<(usize, usize)> {
        let profile = LanguageProfile::from_code("en").unwrap();
        let mut text = Annotated::new(input);
        identify_tokens(&mut text, &profile).unwrap();
        text.class()
            .annotated_runs()
            .map(|run| (run.start, run.end))
            .collect()
    }

    #[test]
    fn test_split_on_whitespace() {
        assert_eq!(spans("ab  cd\tef\n"), vec![(0, 2), (4, 6), (7, 9)]);
    }

    #[test]
    fn test_no_break_space_separates() {
        assert_eq!(spans("10\u{a0}km"), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn test_leading_whitespace_and_single_token() {
        assert_eq!(spans("   word"), vec![(3, 7)]);
        assert_eq!(spans("x"), vec![(0, 1)]);
    }
}
