use std::path::PathBuf;

use crate::error::StartupError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const CHAT_MODEL_VAR: &str = "NEXUS_CHAT_MODEL";
const EMBEDDING_MODEL_VAR: &str = "NEXUS_EMBEDDING_MODEL";
const LORE_PATH_VAR: &str = "NEXUS_LORE_PATH";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_LORE_PATH: &str = "fantasy_lore.txt";

/// Startup configuration, read once from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub lore_path: PathBuf,
}

impl Config {
    /// Loads `.env` (if any) and reads the environment. `lore_arg` is the
    /// first positional command-line argument and wins over `NEXUS_LORE_PATH`.
    pub fn from_env(lore_arg: Option<PathBuf>) -> Result<Self, StartupError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        Self::from_lookup(|key| std::env::var(key).ok(), lore_arg)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        lore_arg: Option<PathBuf>,
    ) -> Result<Self, StartupError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or(StartupError::MissingCredential(API_KEY_VAR))?;

        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let lore_path = lore_arg
            .unwrap_or_else(|| PathBuf::from(or_default(LORE_PATH_VAR, DEFAULT_LORE_PATH)));

        Ok(Self {
            api_key,
            base_url: or_default(BASE_URL_VAR, DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            chat_model: or_default(CHAT_MODEL_VAR, DEFAULT_CHAT_MODEL),
            embedding_model: or_default(EMBEDDING_MODEL_VAR, DEFAULT_EMBEDDING_MODEL),
            lore_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[]), None).unwrap_err();
        assert!(matches!(err, StartupError::MissingCredential(API_KEY_VAR)));
    }

    #[test]
    fn blank_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")]), None).unwrap_err();
        assert!(matches!(err, StartupError::MissingCredential(_)));
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "sk-test")]), None).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.lore_path, PathBuf::from(DEFAULT_LORE_PATH));
    }

    #[test]
    fn overrides_and_trailing_slash() {
        let config = Config::from_lookup(
            lookup(&[
                (API_KEY_VAR, "k"),
                (BASE_URL_VAR, "http://localhost:1234/v1/"),
                (CHAT_MODEL_VAR, "local-model"),
                (LORE_PATH_VAR, "env_lore.txt"),
            ]),
            Some(PathBuf::from("arg_lore.txt")),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert_eq!(config.chat_model, "local-model");
        assert_eq!(config.lore_path, PathBuf::from("arg_lore.txt"));
    }
}
