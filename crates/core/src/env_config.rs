//! Environment-driven settings with warn-level logging for invalid values.

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TAGGING_MODEL,
    PG_POOL_MAX_CONNECTIONS,
};

/// Parse an environment variable with a default fallback.
///
/// - Not set: returns `default` silently.
/// - Set but unparsable: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a non-empty string variable.
#[must_use]
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Process-wide settings read from `INSPIRA_*` variables.
#[derive(Clone)]
pub struct EnvSettings {
    pub database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub tagging_model: String,
    pub taxonomy_path: Option<String>,
    pub pg_max_connections: u32,
}

impl std::fmt::Debug for EnvSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .field("tagging_model", &self.tagging_model)
            .field("taxonomy_path", &self.taxonomy_path)
            .field("pg_max_connections", &self.pg_max_connections)
            .finish()
    }
}

impl EnvSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env_non_empty("INSPIRA_DATABASE_URL"),
            gemini_api_key: env_non_empty("INSPIRA_GEMINI_API_KEY"),
            gemini_base_url: env_non_empty("INSPIRA_GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()),
            chat_model: env_non_empty("INSPIRA_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_owned()),
            image_model: env_non_empty("INSPIRA_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_owned()),
            tagging_model: env_non_empty("INSPIRA_TAGGING_MODEL")
                .unwrap_or_else(|| DEFAULT_TAGGING_MODEL.to_owned()),
            taxonomy_path: env_non_empty("INSPIRA_TAXONOMY_PATH"),
            pg_max_connections: env_parse_with_default(
                "INSPIRA_PG_MAX_CONNECTIONS",
                PG_POOL_MAX_CONNECTIONS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "INSPIRA_TEST_ENV_PARSE_VALID_41871";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "INSPIRA_TEST_ENV_PARSE_INVALID_41872";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let result: u32 = env_parse_with_default("INSPIRA_TEST_ENV_PARSE_MISSING_41873", 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_non_empty_ignores_blank() {
        let var_name = "INSPIRA_TEST_ENV_BLANK_41874";
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(env_non_empty(var_name), None);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_settings_debug_redacts_secrets() {
        let settings = EnvSettings {
            database_url: Some("postgres://user:pw@host/db".to_owned()),
            gemini_api_key: Some("secret-key".to_owned()),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            tagging_model: DEFAULT_TAGGING_MODEL.to_owned(),
            taxonomy_path: None,
            pg_max_connections: 4,
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("pw@host"));
    }
}
