//! Pass 4: number recognition

use super::{for_each_token, Annotated};
use crate::error::Result;
use crate::pattern::PatternMatcher;
use crate::profile::{LanguageProfile, Rule, Section};

fn matches(matcher: Option<&dyn PatternMatcher>, text: &str) -> bool {
    matcher.is_some_and(|m| m.matches_entire(text))
}

/// Classify root-classed tokens that are entirely numeric
///
/// A trailing period is kept on ordinals and split off plain numbers.
/// Returns the number of numbers recognized.
pub fn identify_numbers(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let Some(simple_digits) = profile.matcher(Rule::SimpleDigits) else {
        return Ok(0);
    };
    let ordinal = profile.matcher(Rule::Ordinal);
    let digits = profile.matcher(Rule::Digits);
    let mut recognized = 0;

    for_each_token(text, profile.root(), |text, token| {
        let mut image = token.image();
        if simple_digits.first_match_anywhere(&image).is_none() {
            return Ok(());
        }

        let mut token_end = token.end;
        let period = image.ends_with('.');
        if period {
            if matches(ordinal, &image) {
                let class = profile.class_of(Section::Numbers, &image, Some(Rule::Ordinal))?;
                text.annotate_class(class, token.start, token.end)?;
                recognized += 1;
                return Ok(());
            }
            image.pop();
            token_end -= 1;
        }

        if matches(digits, &image) {
            let class = profile.class_of(Section::Numbers, &image, Some(Rule::Digits))?;
            text.annotate_class(class, token.start, token_end)?;
            if period {
                let class = profile.class_of(Section::Punctuation, ".", None)?;
                text.annotate_class(class, token_end, token_end + 1)?;
            }
            recognized += 1;
        }
        Ok(())
    })?;

    Ok(recognized)
}
