use regex::Regex;

use super::{Match, Matches, PatternMatcher};

/// [`PatternMatcher`] backed by the `regex` crate
///
/// The anchored variants are compiled once up front so that no query has
/// to build a regex.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    source: String,
    unanchored: Regex,
    entire: Regex,
    at_start: Regex,
    at_end: Regex,
}

impl RegexMatcher {
    /// Compile `pattern` and its anchored variants
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            unanchored: Regex::new(pattern)?,
            entire: Regex::new(&format!("^(?:{pattern})$"))?,
            at_start: Regex::new(&format!("^(?:{pattern})"))?,
            at_end: Regex::new(&format!("(?:{pattern})$"))?,
        })
    }

    /// The pattern this matcher was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

fn to_match(text: &str, m: regex::Match<'_>) -> Option<Match> {
    if m.is_empty() {
        return None;
    }
    let start = char_offset(text, m.start());
    Some(Match {
        start,
        end: start + m.as_str().chars().count(),
        image: m.as_str().to_string(),
    })
}

impl PatternMatcher for RegexMatcher {
    fn matches_entire(&self, text: &str) -> bool {
        self.entire.is_match(text)
    }

    fn all_matches(&self, text: &str) -> Matches {
        let mut matches = Matches::new();
        // running conversion keeps this linear in the text length
        let mut last_byte = 0;
        let mut last_char = 0;
        for m in self.unanchored.find_iter(text) {
            if m.is_empty() {
                continue;
            }
            last_char += text[last_byte..m.start()].chars().count();
            last_byte = m.start();
            let len = m.as_str().chars().count();
            matches.push(Match {
                start: last_char,
                end: last_char + len,
                image: m.as_str().to_string(),
            });
        }
        matches
    }

    fn first_match_anywhere(&self, text: &str) -> Option<Match> {
        self.unanchored
            .find_iter(text)
            .find(|m| !m.is_empty())
            .and_then(|m| to_match(text, m))
    }

    fn first_match_at_start(&self, text: &str) -> Option<Match> {
        self.at_start.find(text).and_then(|m| to_match(text, m))
    }

    fn first_match_at_end(&self, text: &str) -> Option<Match> {
        self.at_end.find(text).and_then(|m| to_match(text, m))
    }
}
