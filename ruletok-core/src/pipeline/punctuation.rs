//! Pass 2: punctuation splitting

use super::{for_each_token, Annotated};
use crate::error::Result;
use crate::pattern::{Match, PatternMatcher};
use crate::profile::{ClassId, LanguageProfile, Rule, Section};

/// Whether match `i` is followed by more text before the next punctuation
/// mark or the end of the token
fn has_right_context(matches: &[Match], i: usize, token_len: usize) -> bool {
    match matches.get(i + 1) {
        Some(next) => next.start != matches[i].end,
        None => matches[i].end != token_len,
    }
}

fn matches(matcher: Option<&dyn PatternMatcher>, text: &str) -> bool {
    matcher.is_some_and(|m| m.matches_entire(text))
}

/// Class of a punctuation match inside `token`
///
/// Ambiguous open-or-close marks are resolved by their neighbours: a mark
/// not followed by a letter closes, otherwise one not preceded by a letter
/// opens. With letters on both sides the mark closes.
pub fn punct_class(
    profile: &LanguageProfile,
    punct: &Match,
    rule: Option<Rule>,
    token: &[char],
) -> Result<ClassId> {
    let class = profile.class_of(Section::Punctuation, &punct.image, rule)?;
    let known = profile.well_known();
    if known.open_close_punct != Some(class) {
        return Ok(class);
    }

    let next_is_letter = token.get(punct.end).is_some_and(|c| c.is_alphabetic());
    if !next_is_letter {
        return Ok(known.close_punct);
    }
    let prev_is_letter = punct
        .start
        .checked_sub(1)
        .and_then(|i| token.get(i))
        .is_some_and(|c| c.is_alphabetic());
    if !prev_is_letter {
        return Ok(known.open_punct);
    }
    Ok(known.close_punct)
}

/// Split punctuation off root-classed tokens
///
/// Returns the number of punctuation tokens created.
pub fn identify_punct(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let Some(all_punct) = profile.matcher(Rule::AllPunct) else {
        return Ok(0);
    };
    let internal = profile.matcher(Rule::InternalPunct);
    let nbr = profile.matcher(Rule::NonBreakingRight);
    let nbl = profile.matcher(Rule::NonBreakingLeft);
    let mut created = 0;

    for_each_token(text, profile.root(), |text, token| {
        let image = token.image();
        let found = all_punct.all_matches(&image);
        if found.is_empty() {
            return Ok(());
        }

        let mut index = 0;
        for (i, punct) in found.iter().enumerate() {
            if index != punct.start {
                if matches(internal, &punct.image)
                    && has_right_context(&found, i, token.len())
                {
                    continue;
                }

                if matches(nbr, &punct.image) {
                    text.annotate_class(
                        token.class,
                        token.start + index,
                        token.start + punct.end,
                    )?;
                    index = punct.end;
                    continue;
                }

                // breaking punctuation: close the text before it
                text.annotate_class(
                    token.class,
                    token.start + index,
                    token.start + punct.start,
                )?;
                index = punct.start;
            } else if matches(nbl, &punct.image) && has_right_context(&found, i, token.len()) {
                continue;
            }

            let class = punct_class(profile, punct, None, &token.chars)?;
            text.annotate_class(class, token.start + index, token.start + punct.end)?;
            index = punct.end;
            created += 1;
        }

        if index != token.len() {
            text.annotate_class(token.class, token.start + index, token.end)?;
        }
        Ok(())
    })?;

    Ok(created)
}
