//! Pass 6: text unit and paragraph boundaries
//!
//! A left-to-right walk over the runs of the class channel, tokens and
//! whitespace alike. Terminal punctuation opens a window in which the next
//! token decides whether a new text unit begins. A breaking abbreviation
//! only ends a text unit when a sentence-initial term or an opening mark
//! follows it.

use ruletok_annotate::Border;

use super::Annotated;
use crate::error::Result;
use crate::profile::{ClassId, LanguageProfile, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    EndOfSentence,
    AfterAbbreviation,
}

/// Whether a whitespace run contains a paragraph change
///
/// A paragraph change is a line break character that recurs later in the
/// same run. This accepts `\n\n`, `\r\r` and `\r\n\r\n`.
pub fn is_paragraph_change(whitespace: &str) -> bool {
    let chars: Vec<char> = whitespace.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        (c == '\n' || c == '\r') && chars[i + 1..].contains(&c)
    })
}

/// Mark text unit and paragraph borders
///
/// Returns the number of borders marked.
pub fn identify_text_units(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let internal_tu = profile.matcher(Rule::InternalTu);
    let classes = profile.classes();
    let known = profile.well_known();
    let is_a = |ancestor: ClassId, class: ClassId| classes.is_ancestor_or_self(ancestor, class);

    let len = text.len();
    let mut state = State::Normal;
    let mut marked = 0;
    let mut pos = 0;

    while pos < len {
        let token_start = text.class().run_start(pos);
        let token_end = text.class().run_limit(pos);

        let Some(class) = text.class().value_at(pos) else {
            let whitespace = text.substring(token_start, token_end)?;
            if is_paragraph_change(&whitespace) {
                state = State::Normal;
                if token_end < len {
                    text.mark_border(Border::Paragraph, token_end)?;
                    marked += 1;
                }
            }
            pos = token_end;
            continue;
        };

        match state {
            State::EndOfSentence => {
                let continues = is_a(known.term_punct, class)
                    || is_a(known.term_punct_p, class)
                    || is_a(known.close_punct, class)
                    || is_a(known.close_bracket, class);
                if !continues {
                    let first = text.substring(pos, pos + 1)?;
                    let lowercase = first.chars().next().is_some_and(char::is_lowercase);
                    let inside_unit = internal_tu.is_some_and(|m| m.matches_entire(&first));
                    if !lowercase && !inside_unit {
                        text.mark_border(Border::TextUnit, token_start)?;
                        marked += 1;
                    }
                    state = State::Normal;
                }
            }
            State::AfterAbbreviation => {
                let image = text.substring(token_start, token_end)?;
                if profile.non_capitalizing_terms().contains(&image)
                    || is_a(known.open_punct, class)
                {
                    text.mark_border(Border::TextUnit, token_start)?;
                    marked += 1;
                }
                // the same token may still be terminal punctuation
                state = State::Normal;
                continue;
            }
            State::Normal => {
                if is_a(known.term_punct, class) || is_a(known.term_punct_p, class) {
                    state = State::EndOfSentence;
                } else if is_a(known.b_abbreviation, class) {
                    state = State::AfterAbbreviation;
                }
            }
        }
        pos = token_end;
    }

    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;

    fn borders(code: &str, input: &str) -> Vec<(String, Border)> {
        let profile = LanguageProfile::from_code(code).unwrap();
        let text = pipeline::run(input, &profile).unwrap();
        text.border()
            .annotated_runs()
            .map(|run| {
                let token_end = text.class().run_limit(run.start);
                (text.substring(run.start, token_end).unwrap(), run.value.unwrap())
            })
            .collect()
    }

    fn tu(image: &str) -> (String, Border) {
        (image.to_string(), Border::TextUnit)
    }

    #[test]
    fn test_paragraph_change() {
        assert!(is_paragraph_change("\n\n"));
        assert!(is_paragraph_change(" \n \n "));
        assert!(is_paragraph_change("\r\n\r\n"));
        assert!(is_paragraph_change("\r\r"));
        assert!(!is_paragraph_change("\n"));
        assert!(!is_paragraph_change("\r\n"));
        assert!(!is_paragraph_change("   "));
    }

    #[test]
    fn test_sentence_break_after_terminal_punctuation() {
        assert_eq!(borders("en", "Hi. Go now!"), vec![tu("Go")]);
        assert_eq!(borders("en", "Really?! Yes."), vec![tu("Yes")]);
    }

    #[test]
    fn test_no_break_before_lowercase_or_internal_mark() {
        assert!(borders("en", "Wait... what").is_empty());
        assert!(borders("en", "Hi! , ok").is_empty());
    }

    #[test]
    fn test_closing_marks_stay_in_unit() {
        assert_eq!(borders("en", "(Hi.) Next"), vec![tu("Next")]);
        assert_eq!(borders("en", "\u{201c}Go.\u{201d} She"), vec![tu("She")]);
    }

    #[test]
    fn test_title_does_not_break() {
        assert!(borders("en", "Dr. Smith arrived").is_empty());
    }

    #[test]
    fn test_breaking_abbreviation_before_sentence_initial_term() {
        assert_eq!(borders("en", "apples etc. The end"), vec![tu("The")]);
        assert!(borders("en", "apples etc. and pears").is_empty());
        assert!(borders("en", "Acme Inc. Smith said").is_empty());
    }

    #[test]
    fn test_paragraph_border() {
        assert_eq!(
            borders("en", "One.\n\nTwo"),
            vec![("Two".to_string(), Border::Paragraph)]
        );
        assert_eq!(
            borders("en", "one\r\n\r\ntwo"),
            vec![("two".to_string(), Border::Paragraph)]
        );
        assert!(borders("en", "one\ntwo").is_empty());
    }

    #[test]
    fn test_trailing_paragraph_change_marks_nothing() {
        assert!(borders("en", "End.\n\n").is_empty());
    }
}
