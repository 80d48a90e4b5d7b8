use super::config::ProfileConfig;
use crate::error::{Result, TokenizerError};
use std::collections::HashMap;
use std::sync::OnceLock;

type EmbeddedConfigs = std::result::Result<HashMap<String, ProfileConfig>, String>;

static PROFILE_CONFIGS: OnceLock<EmbeddedConfigs> = OnceLock::new();

macro_rules! embed_profile_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_configs() -> EmbeddedConfigs {
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_profile_config!("en", "../../configs/languages/english.toml"),
        embed_profile_config!("de", "../../configs/languages/german.toml"),
    ];

    for (code, toml_content) in embedded_configs {
        let config: ProfileConfig = toml::from_str(toml_content)
            .map_err(|e| format!("Failed to parse {code} profile: {e}"))?;

        if config.metadata.code != code {
            return Err(format!(
                "Profile code mismatch: expected {}, got {}",
                code, config.metadata.code
            ));
        }

        configs.insert(code.to_string(), config);
    }

    Ok(configs)
}

fn embedded_configs() -> Result<&'static HashMap<String, ProfileConfig>> {
    PROFILE_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_ref()
        .map_err(|e| TokenizerError::Configuration(e.clone()))
}

/// Embedded profile configuration for a language code
pub fn get_profile_config(code: &str) -> Result<&'static ProfileConfig> {
    embedded_configs()?
        .get(code)
        .ok_or_else(|| TokenizerError::UnsupportedLanguage(code.to_string()))
}

/// Codes of all embedded profiles, sorted
pub fn list_available_languages() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = embedded_configs()
        .map(|configs| configs.keys().map(String::as_str).collect())
        .unwrap_or_default();
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_config_unsupported() {
        match get_profile_config("nonexistent") {
            Err(TokenizerError::UnsupportedLanguage(code)) => {
                assert_eq!(code, "nonexistent");
            }
            _ => panic!("Expected UnsupportedLanguage error"),
        }
    }

    #[test]
    fn test_get_profile_config_english() {
        let config = get_profile_config("en").expect("English profile should exist");
        assert_eq!(config.metadata.code, "en");
        assert_eq!(config.metadata.name, "English");
        assert!(!config.abbreviations.lists.is_empty());
    }

    #[test]
    fn test_get_profile_config_german() {
        let config = get_profile_config("de").expect("German profile should exist");
        assert_eq!(config.metadata.code, "de");
        assert_eq!(config.metadata.name, "German");
    }

    #[test]
    fn test_list_available_languages() {
        assert_eq!(list_available_languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_get_profile_config_multiple_times() {
        let config1 = get_profile_config("en").unwrap();
        let config2 = get_profile_config("en").unwrap();
        assert!(std::ptr::eq(config1, config2));
    }
}
