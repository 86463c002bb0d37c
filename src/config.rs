use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::lang::CustomLanguage;

/// Default MyMemory-compatible translation endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `{code}.json` file per language
    pub lang_dir: PathBuf,

    /// Language new text is authored in (always sorted first)
    pub source_language: String,

    /// Per-code overrides for display name, flag and API locale
    pub custom_languages: HashMap<String, CustomLanguage>,

    /// Remote translation endpoint (MyMemory-style GET API)
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let custom_languages = match std::env::var("LINGOSYNC_CUSTOM_LANGUAGES") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .context("LINGOSYNC_CUSTOM_LANGUAGES is not a valid JSON object")?,
            _ => HashMap::new(),
        };

        Ok(Self {
            lang_dir: std::env::var("LINGOSYNC_LANG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("src").join("lang")),

            source_language: std::env::var("LINGOSYNC_SOURCE_LANG")
                .unwrap_or_else(|_| "en".to_string()),

            custom_languages,

            api_url: std::env::var("LINGOSYNC_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "LINGOSYNC_LANG_DIR",
            "LINGOSYNC_SOURCE_LANG",
            "LINGOSYNC_CUSTOM_LANGUAGES",
            "LINGOSYNC_API_URL",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("defaults should load");
        assert_eq!(config.lang_dir, PathBuf::from("src").join("lang"));
        assert_eq!(config.source_language, "en");
        assert!(config.custom_languages.is_empty());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("LINGOSYNC_LANG_DIR", "/tmp/translations");
        std::env::set_var("LINGOSYNC_SOURCE_LANG", "de");
        std::env::set_var(
            "LINGOSYNC_CUSTOM_LANGUAGES",
            r#"{"tlh": {"name": "Klingon", "apiCode": "tlh"}}"#,
        );

        let config = Config::from_env().expect("overrides should load");
        assert_eq!(config.lang_dir, PathBuf::from("/tmp/translations"));
        assert_eq!(config.source_language, "de");
        assert_eq!(
            config
                .custom_languages
                .get("tlh")
                .and_then(|c| c.name.as_deref()),
            Some("Klingon")
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_custom_languages() {
        clear_env();
        std::env::set_var("LINGOSYNC_CUSTOM_LANGUAGES", "not json");

        let result = Config::from_env();
        assert!(result.is_err());

        clear_env();
    }
}
