//! TOML schema for language profiles

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::description::{Rule, Section};
use crate::error::{Result, TokenizerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub metadata: MetadataConfig,
    pub classes: ClassesConfig,
    /// Profile-wide named patterns, referenced as `<NAME>`
    #[serde(default)]
    pub macros: BTreeMap<String, String>,
    #[serde(default)]
    pub punctuation: DescriptionConfig,
    #[serde(default)]
    pub clitics: DescriptionConfig,
    #[serde(default)]
    pub numbers: DescriptionConfig,
    #[serde(default)]
    pub abbreviations: AbbreviationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesConfig {
    pub root: String,
    /// Child class → parent class
    #[serde(default)]
    pub parents: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptionConfig {
    #[serde(default)]
    pub definitions: Vec<DefinitionConfig>,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionConfig {
    pub name: String,
    pub regex: String,
    pub class: String,
}

/// A rule is either a bare pattern or a pattern with a class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    Pattern(String),
    Classified {
        regex: String,
        #[serde(default)]
        class: Option<String>,
    },
}

impl RuleConfig {
    pub fn regex(&self) -> &str {
        match self {
            RuleConfig::Pattern(regex) => regex,
            RuleConfig::Classified { regex, .. } => regex,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            RuleConfig::Pattern(_) => None,
            RuleConfig::Classified { class, .. } => class.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationsConfig {
    #[serde(flatten)]
    pub description: DescriptionConfig,
    /// Lookup lists, checked in declaration order
    #[serde(default)]
    pub lists: Vec<ListConfig>,
    /// Terms that are only capitalized at the start of a sentence
    #[serde(default)]
    pub non_capitalized_terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub class: String,
    pub entries: Vec<String>,
}

impl ProfileConfig {
    /// Parse a profile from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TokenizerError::Configuration(format!("Failed to parse TOML: {e}")))
    }

    /// Description section by kind
    pub fn section(&self, section: Section) -> &DescriptionConfig {
        match section {
            Section::Punctuation => &self.punctuation,
            Section::Clitics => &self.clitics,
            Section::Numbers => &self.numbers,
            Section::Abbreviations => &self.abbreviations.description,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(TokenizerError::Configuration(
                "Profile has no language code".to_string(),
            ));
        }
        if self.classes.root.trim().is_empty() {
            return Err(TokenizerError::Configuration(
                "Profile has no root class".to_string(),
            ));
        }
        for section in Section::ALL {
            for key in self.section(section).rules.keys() {
                if Rule::from_key(section, key).is_none() {
                    log::warn!(
                        "Ignoring unknown rule '{key}' in [{}] of profile '{}'",
                        section.key(),
                        self.metadata.code
                    );
                }
            }
        }
        for list in &self.abbreviations.lists {
            if list.class.trim().is_empty() {
                return Err(TokenizerError::Configuration(
                    "Abbreviation list without class".to_string(),
                ));
            }
        }
        Ok(())
    }
}
