//! Language profiles
//!
//! A [`LanguageProfile`] bundles everything the pipeline needs for one
//! language: the class hierarchy, compiled pattern descriptions, the
//! abbreviation lookup lists and the non-capitalizing terms. Profiles are
//! described in TOML (see [`ProfileConfig`]) and are immutable once built.

pub mod classes;
pub mod config;
pub mod description;
mod loader;

use std::collections::HashSet;
use std::path::Path;

pub use classes::{ClassId, TokenClasses};
pub use config::ProfileConfig;
pub use description::{Description, Rule, Section};
pub use loader::{get_profile_config, list_available_languages};

use crate::error::{Result, TokenizerError};
use crate::pattern::PatternMatcher;

/// Class names the pipeline itself relies on
pub mod well_known {
    pub const TERM_PUNCT: &str = "TERM_PUNCT";
    pub const TERM_PUNCT_P: &str = "TERM_PUNCT_P";
    pub const OPEN_PUNCT: &str = "OPEN_PUNCT";
    pub const CLOSE_PUNCT: &str = "CLOSE_PUNCT";
    pub const CLOSE_BRACKET: &str = "CLOSE_BRACKET";
    pub const OPENCLOSE_PUNCT: &str = "OPENCLOSE_PUNCT";
    pub const B_ABBREVIATION: &str = "B_ABBREVIATION";
}

/// Well-known classes resolved against one hierarchy
#[derive(Debug, Clone, Copy)]
pub struct WellKnownClasses {
    pub term_punct: ClassId,
    pub term_punct_p: ClassId,
    pub open_punct: ClassId,
    pub close_punct: ClassId,
    pub close_bracket: ClassId,
    /// Ambiguous open-or-close mark; without it no disambiguation happens
    pub open_close_punct: Option<ClassId>,
    pub b_abbreviation: ClassId,
}

impl WellKnownClasses {
    fn resolve(classes: &TokenClasses) -> Result<Self> {
        let required = |name: &str| {
            classes.id(name).ok_or_else(|| {
                TokenizerError::Configuration(format!(
                    "Profile does not define required class {name}"
                ))
            })
        };
        Ok(Self {
            term_punct: required(well_known::TERM_PUNCT)?,
            term_punct_p: required(well_known::TERM_PUNCT_P)?,
            open_punct: required(well_known::OPEN_PUNCT)?,
            close_punct: required(well_known::CLOSE_PUNCT)?,
            close_bracket: required(well_known::CLOSE_BRACKET)?,
            open_close_punct: classes.id(well_known::OPENCLOSE_PUNCT),
            b_abbreviation: required(well_known::B_ABBREVIATION)?,
        })
    }
}

/// Everything the pipeline consults for one language
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: String,
    name: String,
    classes: TokenClasses,
    well_known: WellKnownClasses,
    punctuation: Description,
    clitics: Description,
    numbers: Description,
    abbreviations: Description,
    lookup_lists: Vec<(ClassId, HashSet<String>)>,
    non_capitalizing_terms: HashSet<String>,
}

impl LanguageProfile {
    /// Build the embedded profile for a language code
    pub fn from_code(code: &str) -> Result<Self> {
        let config = get_profile_config(code)?;
        Self::from_config(config)
    }

    /// Build a profile from an external TOML file
    pub fn from_file(path: &Path, language_code: Option<&str>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TokenizerError::Configuration(format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config: ProfileConfig = toml::from_str(&content).map_err(|e| {
            TokenizerError::Configuration(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Override language code if provided
        if let Some(code) = language_code {
            config.metadata.code = code.to_string();
        }

        Self::from_config(&config)
    }

    /// Build a profile from a parsed configuration
    pub fn from_config(config: &ProfileConfig) -> Result<Self> {
        config.validate()?;

        let classes = TokenClasses::new(&config.classes.root, &config.classes.parents)?;
        let well_known = WellKnownClasses::resolve(&classes)?;
        let macros = description::expand_macros(&config.macros)?;

        let compile = |section: Section| {
            Description::compile(section, config.section(section), &macros, &classes)
        };
        let punctuation = compile(Section::Punctuation)?;
        let clitics = compile(Section::Clitics)?;
        let numbers = compile(Section::Numbers)?;
        let abbreviations = compile(Section::Abbreviations)?;

        let mut lookup_lists = Vec::with_capacity(config.abbreviations.lists.len());
        for list in &config.abbreviations.lists {
            let class = classes.id(&list.class).ok_or_else(|| {
                TokenizerError::Configuration(format!(
                    "Abbreviation list refers to unknown class {}",
                    list.class
                ))
            })?;
            let mut items = HashSet::new();
            for entry in list.entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
                items.insert(entry.to_string());
                items.insert(entry.to_uppercase());
                if entry.chars().next().is_some_and(char::is_lowercase) {
                    items.insert(capitalize(entry));
                }
            }
            lookup_lists.push((class, items));
        }

        let mut non_capitalizing_terms = HashSet::new();
        for term in config
            .abbreviations
            .non_capitalized_terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
        {
            non_capitalizing_terms.insert(capitalize(term));
            non_capitalizing_terms.insert(term.to_uppercase());
        }

        log::info!(
            "Loaded language profile '{}' ({} classes, {} lookup lists)",
            config.metadata.code,
            classes.len(),
            lookup_lists.len()
        );

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            classes,
            well_known,
            punctuation,
            clitics,
            numbers,
            abbreviations,
            lookup_lists,
            non_capitalizing_terms,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &TokenClasses {
        &self.classes
    }

    pub fn well_known(&self) -> &WellKnownClasses {
        &self.well_known
    }

    /// Root class of the hierarchy
    #[inline]
    pub fn root(&self) -> ClassId {
        self.classes.root()
    }

    pub fn description(&self, section: Section) -> &Description {
        match section {
            Section::Punctuation => &self.punctuation,
            Section::Clitics => &self.clitics,
            Section::Numbers => &self.numbers,
            Section::Abbreviations => &self.abbreviations,
        }
    }

    /// Matcher for a named rule, `None` if the profile does not define it
    pub fn matcher(&self, rule: Rule) -> Option<&dyn PatternMatcher> {
        self.description(rule.section())
            .matcher(rule)
            .map(|m| m as &dyn PatternMatcher)
    }

    /// Class of `text` within a section, optionally found via `rule`
    pub fn class_of(&self, section: Section, text: &str, rule: Option<Rule>) -> Result<ClassId> {
        self.description(section).class_of(text, rule)
    }

    /// Lookup lists in declaration order
    pub fn lookup_lists(&self) -> &[(ClassId, HashSet<String>)] {
        &self.lookup_lists
    }

    /// Class of the first lookup list containing `text`
    pub fn lookup(&self, text: &str) -> Option<ClassId> {
        self.lookup_lists
            .iter()
            .find(|(_, items)| items.contains(text))
            .map(|(class, _)| *class)
    }

    pub fn non_capitalizing_terms(&self) -> &HashSet<String> {
        &self.non_capitalizing_terms
    }

    /// Name-based ancestor-or-self query
    pub fn is_ancestor(&self, tag1: &str, tag2: &str) -> Result<bool> {
        self.classes.is_ancestor(tag1, tag2)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
