//! Pass 3: clitic splitting
//!
//! Left-side work (non-breaking-left punctuation, then proclitics) is fully
//! resolved before the right side is looked at. Enclitics are probed on the
//! span left over by the proclitics, excluding a trailing non-breaking-right
//! mark.

use super::punctuation::punct_class;
use super::{for_each_token, Annotated};
use crate::error::Result;
use crate::pattern::{Match, PatternMatcher};
use crate::profile::{LanguageProfile, Rule, Section};

fn probe_start(matcher: Option<&dyn PatternMatcher>, text: &str) -> Option<Match> {
    matcher.and_then(|m| m.first_match_at_start(text))
}

fn probe_end(matcher: Option<&dyn PatternMatcher>, text: &str) -> Option<Match> {
    matcher.and_then(|m| m.first_match_at_end(text))
}

/// Peel proclitics and enclitics off root-classed tokens
///
/// Returns the number of clitic tokens created.
pub fn identify_clitics(text: &mut Annotated, profile: &LanguageProfile) -> Result<usize> {
    let proclitic = profile.matcher(Rule::Proclitic);
    let enclitic = profile.matcher(Rule::Enclitic);
    if proclitic.is_none() && enclitic.is_none() {
        return Ok(0);
    }
    let nbl = profile.matcher(Rule::NonBreakingLeft);
    let nbr = profile.matcher(Rule::NonBreakingRight);
    let root = profile.root();
    let mut created = 0;

    for_each_token(text, root, |text, token| {
        let image = token.image();
        let mut start_index = 0;
        let mut end_index = token.len();

        // proclitics
        let left_punct = probe_start(nbl, &image);
        let mut proclit = match &left_punct {
            Some(punct) => probe_start(proclitic, &token.slice(punct.end, end_index)),
            None => probe_start(proclitic, &image),
        };
        if let (Some(punct), Some(_)) = (&left_punct, &proclit) {
            let class = punct_class(profile, punct, Some(Rule::NonBreakingLeft), &token.chars)?;
            text.annotate_class(class, token.start + punct.start, token.start + punct.end)?;
            start_index = punct.end;
        }
        while let Some(clitic) = proclit {
            let class = profile.class_of(Section::Clitics, &clitic.image, Some(Rule::Proclitic))?;
            text.annotate_class(
                class,
                token.start + start_index + clitic.start,
                token.start + start_index + clitic.end,
            )?;
            start_index += clitic.end;
            created += 1;
            proclit = probe_start(proclitic, &token.slice(start_index, token.len()));
        }

        // enclitics
        let right_punct = probe_end(nbr, &image);
        let mut enclit = match &right_punct {
            Some(punct) if punct.start >= start_index => {
                probe_end(enclitic, &token.slice(start_index, punct.start))
            }
            Some(_) => None,
            None => probe_end(enclitic, &token.slice(start_index, end_index)),
        };
        if let (Some(punct), Some(_)) = (&right_punct, &enclit) {
            let class = punct_class(profile, punct, Some(Rule::NonBreakingRight), &token.chars)?;
            text.annotate_class(class, token.start + punct.start, token.start + punct.end)?;
            end_index = punct.start;
        }
        while let Some(clitic) = enclit {
            let class = profile.class_of(Section::Clitics, &clitic.image, Some(Rule::Enclitic))?;
            text.annotate_class(
                class,
                token.start + start_index + clitic.start,
                token.start + start_index + clitic.end,
            )?;
            end_index = start_index + clitic.start;
            created += 1;
            enclit = probe_end(enclitic, &token.slice(start_index, end_index));
        }

        if start_index != end_index {
            text.annotate_class(root, token.start + start_index, token.start + end_index)?;
        }
        Ok(())
    })?;

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::super::{punctuation::identify_punct, whitespace::identify_tokens};
    use super::*;
    use crate::profile::ProfileConfig;

    fn run(profile: &LanguageProfile, input: &str) -> Vec<(String, String)> {
        let mut text = Annotated::new(input);
        identify_tokens(&mut text, profile).unwrap();
        identify_punct(&mut text, profile).unwrap();
        identify_clitics(&mut text, profile).unwrap();
        text.class()
            .annotated_runs()
            .map(|run| {
                let image = text.substring(run.start, run.end).unwrap();
                let class = run.value.map(|c| profile.classes().name(c).to_string());
                (image, class.unwrap_or_default())
            })
            .collect()
    }

    fn clitic_profile() -> LanguageProfile {
        let config = ProfileConfig::from_toml_str(
            r#"
            [metadata]
            code = "xx"
            name = "Clitic test"

            [classes]
            root = "TOKEN"
            [classes.parents]
            PUNCT = "TOKEN"
            TERM_PUNCT = "PUNCT"
            TERM_PUNCT_P = "PUNCT"
            OPEN_PUNCT = "PUNCT"
            CLOSE_PUNCT = "PUNCT"
            CLOSE_BRACKET = "PUNCT"
            B_ABBREVIATION = "TOKEN"
            PROCLITIC = "TOKEN"
            ENCLITIC = "TOKEN"

            [punctuation]
            definitions = [
                { name = "PERIOD", regex = '\.', class = "TERM_PUNCT_P" },
                { name = "INV", regex = '¿', class = "OPEN_PUNCT" },
                { name = "APOS", regex = "'", class = "CLOSE_PUNCT" },
            ]
            [punctuation.rules]
            internal = "'"
            non_breaking_left = '¿'
            non_breaking_right = '\.'

            [clitics]
            definitions = [
                { name = "PRO", regex = "l'|d'", class = "PROCLITIC" },
                { name = "EN", regex = "-la|-lo", class = "ENCLITIC" },
            ]
            [clitics.rules]
            proclitic = "<PRO>"
            enclitic = "<EN>"
            "#,
        )
        .unwrap();
        LanguageProfile::from_config(&config).unwrap()
    }

    #[test]
    fn test_english_enclitic() {
        let profile = LanguageProfile::from_code("en").unwrap();
        let tokens = run(&profile, "don't");
        assert_eq!(
            tokens,
            vec![
                ("don".to_string(), "TOKEN".to_string()),
                ("'t".to_string(), "ENCLITIC".to_string()),
            ]
        );
    }

    #[test]
    fn test_word_without_clitics_is_unchanged() {
        let profile = LanguageProfile::from_code("en").unwrap();
        let tokens = run(&profile, "hi");
        assert_eq!(tokens, vec![("hi".to_string(), "TOKEN".to_string())]);
    }

    #[test]
    fn test_repeated_proclitics() {
        let profile = clitic_profile();
        let images: Vec<_> = run(&profile, "d'l'homme").into_iter().map(|t| t.0).collect();
        assert_eq!(images, vec!["d'", "l'", "homme"]);
    }

    #[test]
    fn test_non_breaking_left_split_only_with_proclitic() {
        let profile = clitic_profile();
        let tokens = run(&profile, "¿l'homme");
        assert_eq!(tokens[0], ("¿".to_string(), "OPEN_PUNCT".to_string()));
        assert_eq!(tokens[1], ("l'".to_string(), "PROCLITIC".to_string()));
        assert_eq!(tokens[2], ("homme".to_string(), "TOKEN".to_string()));

        let images: Vec<_> = run(&profile, "¿homme").into_iter().map(|t| t.0).collect();
        assert_eq!(images, vec!["¿homme"]);
    }

    #[test]
    fn test_enclitics_before_non_breaking_right() {
        let profile = clitic_profile();
        let tokens = run(&profile, "dame-la-lo.");
        let images: Vec<_> = tokens.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(images, vec!["dame", "-la", "-lo", "."]);
        assert_eq!(tokens[3].1, "TERM_PUNCT_P");
    }
}
