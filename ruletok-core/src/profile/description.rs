//! Compiled pattern descriptions
//!
//! A description holds class *definitions* and named *rules*. Definitions
//! sharing a class are merged into a single alternation, rules may refer to
//! definitions and macros as `<NAME>`.

use std::collections::{BTreeMap, HashMap};

use super::classes::{ClassId, TokenClasses};
use super::config::DescriptionConfig;
use crate::error::{Result, TokenizerError};
use crate::pattern::{PatternMatcher, RegexMatcher};

/// Nesting limit for `<NAME>` references inside macros
const MAX_MACRO_DEPTH: usize = 16;

/// The four description sections of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Punctuation,
    Clitics,
    Numbers,
    Abbreviations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Punctuation,
        Section::Clitics,
        Section::Numbers,
        Section::Abbreviations,
    ];

    /// TOML table name of the section
    pub fn key(self) -> &'static str {
        match self {
            Section::Punctuation => "punctuation",
            Section::Clitics => "clitics",
            Section::Numbers => "numbers",
            Section::Abbreviations => "abbreviations",
        }
    }
}

/// Named matchers the pipeline consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Every punctuation mark
    AllPunct,
    /// Punctuation that does not end a token by itself
    InternalPunct,
    /// Punctuation that stays attached to the text on its right
    NonBreakingLeft,
    /// Punctuation that stays attached to the text on its left
    NonBreakingRight,
    /// Punctuation that cannot start a new text unit
    InternalTu,
    Proclitic,
    Enclitic,
    /// Probe for "token contains a digit"
    SimpleDigits,
    Ordinal,
    Digits,
    /// Mid-name initial such as `J.`
    Initial,
    /// General abbreviation shape
    AllAbbrev,
}

impl Rule {
    pub const ALL: [Rule; 12] = [
        Rule::AllPunct,
        Rule::InternalPunct,
        Rule::NonBreakingLeft,
        Rule::NonBreakingRight,
        Rule::InternalTu,
        Rule::Proclitic,
        Rule::Enclitic,
        Rule::SimpleDigits,
        Rule::Ordinal,
        Rule::Digits,
        Rule::Initial,
        Rule::AllAbbrev,
    ];

    /// Section the rule belongs to
    pub fn section(self) -> Section {
        match self {
            Rule::AllPunct
            | Rule::InternalPunct
            | Rule::NonBreakingLeft
            | Rule::NonBreakingRight
            | Rule::InternalTu => Section::Punctuation,
            Rule::Proclitic | Rule::Enclitic => Section::Clitics,
            Rule::SimpleDigits | Rule::Ordinal | Rule::Digits => Section::Numbers,
            Rule::Initial | Rule::AllAbbrev => Section::Abbreviations,
        }
    }

    /// Key of the rule inside its section's `rules` table
    pub fn key(self) -> &'static str {
        match self {
            Rule::AllPunct | Rule::AllAbbrev => "all",
            Rule::InternalPunct => "internal",
            Rule::NonBreakingLeft => "non_breaking_left",
            Rule::NonBreakingRight => "non_breaking_right",
            Rule::InternalTu => "internal_tu",
            Rule::Proclitic => "proclitic",
            Rule::Enclitic => "enclitic",
            Rule::SimpleDigits => "simple_digits",
            Rule::Ordinal => "ordinal",
            Rule::Digits => "digits",
            Rule::Initial => "initial",
        }
    }

    pub fn from_key(section: Section, key: &str) -> Option<Rule> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.section() == section && rule.key() == key)
    }

    /// The section-wide rule that defaults to all definitions
    fn default_for(section: Section) -> Option<Rule> {
        match section {
            Section::Punctuation => Some(Rule::AllPunct),
            Section::Abbreviations => Some(Rule::AllAbbrev),
            Section::Clitics | Section::Numbers => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: RegexMatcher,
    class: Option<ClassId>,
}

/// One compiled description section
#[derive(Debug, Clone)]
pub struct Description {
    section: Section,
    /// Merged definitions per class, in order of first appearance
    definitions: Vec<(ClassId, RegexMatcher)>,
    rules: HashMap<Rule, CompiledRule>,
}

impl Description {
    /// Compile a description section
    ///
    /// `macros` must already be expanded (see [`expand_macros`]).
    pub fn compile(
        section: Section,
        config: &DescriptionConfig,
        macros: &BTreeMap<String, String>,
        classes: &TokenClasses,
    ) -> Result<Self> {
        let mut by_name: HashMap<&str, String> = HashMap::new();
        let mut ordered: Vec<String> = Vec::new();
        let mut merged: Vec<(ClassId, String)> = Vec::new();

        for def in &config.definitions {
            if by_name.contains_key(def.name.as_str()) {
                log::warn!(
                    "Duplicate definition {} in [{}], keeping the first one",
                    def.name,
                    section.key()
                );
                continue;
            }
            let class = classes.id(&def.class).ok_or_else(|| {
                TokenizerError::Configuration(format!(
                    "Definition {} in [{}] refers to unknown class {}",
                    def.name,
                    section.key(),
                    def.class
                ))
            })?;
            let regex = expand_references(&def.regex, |name| macros.get(name).cloned());
            match merged.iter_mut().find(|(id, _)| *id == class) {
                Some((_, alternation)) => {
                    alternation.push_str("|(?:");
                    alternation.push_str(&regex);
                    alternation.push(')');
                }
                None => merged.push((class, format!("(?:{regex})"))),
            }
            ordered.push(regex.clone());
            by_name.insert(def.name.as_str(), regex);
        }

        let definitions = merged
            .into_iter()
            .map(|(class, regex)| {
                RegexMatcher::new(&regex)
                    .map(|matcher| (class, matcher))
                    .map_err(|source| TokenizerError::InvalidPattern {
                        name: classes.name(class).to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rules = HashMap::new();
        for (key, rule_config) in &config.rules {
            let Some(rule) = Rule::from_key(section, key) else {
                continue;
            };
            let regex = expand_references(rule_config.regex(), |name| {
                by_name
                    .get(name)
                    .cloned()
                    .or_else(|| macros.get(name).cloned())
            });
            let class = rule_config
                .class()
                .map(|name| {
                    classes.id(name).ok_or_else(|| {
                        TokenizerError::Configuration(format!(
                            "Rule {key} in [{}] refers to unknown class {name}",
                            section.key()
                        ))
                    })
                })
                .transpose()?;
            rules.insert(rule, compile_rule(rule, &regex, class)?);
        }

        if let Some(rule) = Rule::default_for(section) {
            if !rules.contains_key(&rule) && !ordered.is_empty() {
                let regex = ordered
                    .iter()
                    .map(|r| format!("(?:{r})"))
                    .collect::<Vec<_>>()
                    .join("|");
                rules.insert(rule, compile_rule(rule, &regex, None)?);
            }
        }

        log::debug!(
            "Compiled [{}]: {} classes, {} rules",
            section.key(),
            definitions.len(),
            rules.len()
        );

        Ok(Self {
            section,
            definitions,
            rules,
        })
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Matcher for a rule of this section
    pub fn matcher(&self, rule: Rule) -> Option<&RegexMatcher> {
        self.rules.get(&rule).map(|r| &r.matcher)
    }

    /// Class of `text`: the rule's class if it has one, otherwise the first
    /// class whose definition matches the whole text
    pub fn class_of(&self, text: &str, rule: Option<Rule>) -> Result<ClassId> {
        if let Some(class) = rule.and_then(|r| self.rules.get(&r)).and_then(|r| r.class) {
            return Ok(class);
        }
        self.definitions
            .iter()
            .find(|(_, matcher)| matcher.matches_entire(text))
            .map(|(class, _)| *class)
            .ok_or_else(|| TokenizerError::UnclassifiableToken(text.to_string()))
    }
}

fn compile_rule(rule: Rule, regex: &str, class: Option<ClassId>) -> Result<CompiledRule> {
    let matcher = RegexMatcher::new(regex).map_err(|source| TokenizerError::InvalidPattern {
        name: format!("{}.{}", rule.section().key(), rule.key()),
        source,
    })?;
    Ok(CompiledRule { matcher, class })
}

/// Expand `<NAME>` references between macros
pub fn expand_macros(macros: &BTreeMap<String, String>) -> Result<BTreeMap<String, String>> {
    fn expand(
        name: &str,
        macros: &BTreeMap<String, String>,
        depth: usize,
    ) -> Result<Option<String>> {
        if depth > MAX_MACRO_DEPTH {
            return Err(TokenizerError::Configuration(format!(
                "Macro {name} is nested too deeply or recursive"
            )));
        }
        let Some(raw) = macros.get(name) else {
            return Ok(None);
        };
        let mut failure = None;
        let expanded = expand_references(raw, |inner| match expand(inner, macros, depth + 1) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                None
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(Some(expanded)),
        }
    }

    macros
        .keys()
        .map(|name| {
            let expanded = expand(name, macros, 0)?.unwrap_or_default();
            Ok((name.clone(), expanded))
        })
        .collect()
}

/// Replace every `<NAME>` in `pattern` with `(?:resolved)`
///
/// Named-group syntax (`(?<name>` and `(?P<name>`) is left alone, as are
/// references the resolver does not know.
pub fn expand_references(pattern: &str, mut resolve: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(open) = rest.find('<') {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);
        let name_len = tail[1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len() - 1);
        let closes = tail[1 + name_len..].starts_with('>');
        let group_syntax = out.ends_with("(?") || out.ends_with("(?P");
        if name_len == 0 || !closes || group_syntax {
            out.push('<');
            rest = &tail[1..];
            continue;
        }
        let name = &tail[1..1 + name_len];
        match resolve(name) {
            Some(value) => {
                out.push_str("(?:");
                out.push_str(&value);
                out.push(')');
            }
            None => {
                log::warn!("Unknown reference <{name}> in pattern {pattern}");
                out.push_str(&tail[..name_len + 2]);
            }
        }
        rest = &tail[name_len + 2..];
    }
    out.push_str(rest);
    out
}
