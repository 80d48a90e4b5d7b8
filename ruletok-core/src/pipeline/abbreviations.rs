//! Pass 5: abbreviation recognition
//!
//! Candidates are root-classed tokens ending in a single non-breaking-right
//! period. A candidate is checked against the lookup lists, then the initial
//! rule, then the general abbreviation rule. A candidate matching none of
//! them gets its period split off.

use super::punctuation::punct_class;
use super::{for_each_token, Annotated};
use crate::error::Result;
use crate::pattern::PatternMatcher;
use crate::profile::{LanguageProfile, Rule, Section};

fn matches(matcher: Option<&dyn PatternMatcher>, text: &str) -> bool {
    matcher.is_some_and(|m| m.matches_entire(text))
}

/// For hyphenated compounds, the part after the last hyphen when it holds at
/// least two non-digit characters
fn hyphen_tail(image: &str) -> Option<&str> {
    let (_, tail) = image.rsplit_once('-')?;
    let non_digits = tail.chars().filter(|c| !c.is_ascii_digit()).count();
    (tail.chars().count() >= 2 && non_digits == tail.chars().count()).then_some(tail)
}

/// Classify abbreviations and split periods off ordinary words
///
/// Returns the number of abbreviations recognized.
pub fn identify_abbreviations(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let Some(nbr) = profile.matcher(Rule::NonBreakingRight) else {
        return Ok(0);
    };
    let initial = profile.matcher(Rule::Initial);
    let all_abbrev = profile.matcher(Rule::AllAbbrev);
    let mut recognized = 0;

    for_each_token(text, profile.root(), |text, token| {
        let image = token.image();
        let Some(punct) = nbr.first_match_at_end(&image) else {
            return Ok(());
        };
        if punct.image != "." {
            return Ok(());
        }

        let candidate = hyphen_tail(&image).unwrap_or(&image);
        let abbrev_end = token.start + punct.end;

        if let Some(class) = profile.lookup(candidate) {
            text.annotate_class(class, token.start, abbrev_end)?;
            recognized += 1;
        } else if matches(initial, candidate) {
            let class = profile.class_of(Section::Abbreviations, candidate, Some(Rule::Initial))?;
            text.annotate_class(class, token.start, abbrev_end)?;
            recognized += 1;
        } else if matches(all_abbrev, candidate) {
            let class =
                profile.class_of(Section::Abbreviations, candidate, Some(Rule::AllAbbrev))?;
            text.annotate_class(class, token.start, abbrev_end)?;
            recognized += 1;
        } else {
            let class = punct_class(profile, &punct, Some(Rule::NonBreakingRight), &token.chars)?;
            text.annotate_class(class, token.start + punct.start, abbrev_end)?;
        }
        Ok(())
    })?;

    Ok(recognized)
}
