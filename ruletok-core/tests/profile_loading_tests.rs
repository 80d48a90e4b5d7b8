//! Tests for building profiles from external configuration

use std::io::Write;
use std::path::Path;

use ruletok_core::{LanguageProfile, ProfileConfig, Tokenizer, TokenizerError};
use tempfile::NamedTempFile;

const ENGLISH: &str = include_str!("../configs/languages/english.toml");

/// Minimal profile: periods and exclamation marks, no clitics or numbers
fn minimal_profile(extra: &str) -> String {
    format!(
        r#"
[metadata]
code = "min"
name = "Minimal"

[classes]
root = "TOKEN"

[classes.parents]
PUNCT = "TOKEN"
TERM_PUNCT = "PUNCT"
TERM_PUNCT_P = "PUNCT"
OPEN_PUNCT = "PUNCT"
CLOSE_PUNCT = "PUNCT"
CLOSE_BRACKET = "PUNCT"
ABBREVIATION = "TOKEN"
B_ABBREVIATION = "ABBREVIATION"

{extra}
"#
    )
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_from_file_with_code_override() {
    let file = write_temp(ENGLISH);
    let profile = LanguageProfile::from_file(file.path(), Some("en-custom")).unwrap();
    assert_eq!(profile.code(), "en-custom");
    assert_eq!(profile.name(), "English");

    let tokenizer = Tokenizer::empty().with_profile(profile);
    let result = tokenizer.tokenize("Mr. Smith left. He was late.", "en-custom").unwrap();
    assert_eq!(result.text_units().len(), 2);
}

#[test]
fn test_from_file_missing() {
    let err = LanguageProfile::from_file(Path::new("/nonexistent/profile.toml"), None).unwrap_err();
    assert!(matches!(err, TokenizerError::Configuration(_)));
    assert!(err
        .to_string()
        .starts_with("Configuration error: Failed to read file '/nonexistent/profile.toml'"));
}

#[test]
fn test_from_file_invalid_toml() {
    let file = write_temp("[metadata\ncode = ");
    let err = LanguageProfile::from_file(file.path(), None).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML from"));
}

#[test]
fn test_missing_well_known_class() {
    let config = ProfileConfig::from_toml_str(
        r#"
        [metadata]
        code = "bad"
        name = "Bad"
        [classes]
        root = "TOKEN"
        "#,
    )
    .unwrap();
    let err = LanguageProfile::from_config(&config).unwrap_err();
    assert!(matches!(err, TokenizerError::Configuration(_)));
}

#[test]
fn test_invalid_pattern() {
    let text = minimal_profile(
        r#"
[punctuation]
definitions = [{ name = "BROKEN", regex = "[.", class = "TERM_PUNCT_P" }]
"#,
    );
    let config = ProfileConfig::from_toml_str(&text).unwrap();
    let err = LanguageProfile::from_config(&config).unwrap_err();
    assert!(matches!(err, TokenizerError::InvalidPattern { .. }));
}

#[test]
fn test_unclassifiable_token_aborts() {
    // the all rule accepts '!' but no definition classifies it
    let text = minimal_profile(
        r#"
[punctuation]
definitions = [{ name = "PERIOD", regex = '\.', class = "TERM_PUNCT_P" }]
[punctuation.rules]
all = '[.!]'
"#,
    );
    let config = ProfileConfig::from_toml_str(&text).unwrap();
    let profile = LanguageProfile::from_config(&config).unwrap();
    let tokenizer = Tokenizer::empty().with_profile(profile);

    assert!(tokenizer.tokenize("Fine.", "min").is_ok());
    let err = tokenizer.tokenize("Stop!", "min").unwrap_err();
    assert!(matches!(err, TokenizerError::UnclassifiableToken(ref s) if s == "!"));
    assert_eq!(err.to_string(), "could not find class for !");
}

#[test]
fn test_custom_breaking_abbreviation_list() {
    let text = minimal_profile(
        r#"
[punctuation]
definitions = [{ name = "PERIOD", regex = '\.', class = "TERM_PUNCT_P" }]
[punctuation.rules]
non_breaking_right = '\.'

[abbreviations]
lists = [{ class = "B_ABBREVIATION", entries = ["Dr."] }]
non_capitalized_terms = ["the"]
"#,
    );
    let config = ProfileConfig::from_toml_str(&text).unwrap();
    let tokenizer = Tokenizer::empty().with_profile(LanguageProfile::from_config(&config).unwrap());

    // a name after a breaking abbreviation continues the unit
    let result = tokenizer.tokenize("Dr. Smith arrived.", "min").unwrap();
    assert_eq!(result.text_units().len(), 1);

    // a sentence-initial term after it starts a new one
    let result = tokenizer.tokenize("Ask the Dr. The end.", "min").unwrap();
    let units = result.text_units();
    assert_eq!(units.len(), 2);
    assert_eq!(units[1][0].image, "The");
}

#[test]
fn test_proclitics_and_ordinals_are_optional() {
    // English declares neither; every pass still runs
    let profile = LanguageProfile::from_code("en").unwrap();
    let tokenizer = Tokenizer::empty().with_profile(profile);
    let result = tokenizer.tokenize("On the 3rd day, 10. items.", "en").unwrap();
    assert!(result.tokens().count() > 0);
}

#[test]
fn test_bracket_non_breaking_marks_stay_attached() {
    // brackets configured as non-breaking with no clitic to split off
    let text = ENGLISH
        .replace("non_breaking_left = '[¿¡]'", "non_breaking_left = '[¿¡(]'")
        .replace("non_breaking_right = '\\.'", "non_breaking_right = '[.)]'");
    let config = ProfileConfig::from_toml_str(&text).unwrap();
    let tokenizer = Tokenizer::empty().with_profile(LanguageProfile::from_config(&config).unwrap());

    let result = tokenizer.tokenize("(hi)", "en").unwrap();
    let tokens: Vec<_> = result.tokens().collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].image, "(hi)");
    assert_eq!(result.class_name(tokens[0].class), "TOKEN");

    // a period on an unknown word is still split off
    let result = tokenizer.tokenize("He left.", "en").unwrap();
    let images: Vec<_> = result.tokens().map(|t| t.image).collect();
    assert_eq!(images, vec!["He", "left", "."]);
}
