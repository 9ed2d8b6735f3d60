//! Configuration loader for Chatline.
//!
//! Reads an optional `chatline.toml` and deserializes it into
//! [`ChatConfig`], then layers environment overrides on top. Falls back to
//! sensible defaults when the file is missing or malformed. The API key is
//! read from the environment only and never enters [`ChatConfig`].

use std::path::Path;

use secrecy::SecretString;

use chatline_types::config::ChatConfig;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "chatline.toml";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(path: &Path) -> ChatConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ChatConfig::default()
        }
    }
}

/// Apply `PORT` and `OPENAI_BASE_URL` overrides.
///
/// `lookup` is `std::env::var` in production; tests pass a closure over a map.
/// An unparsable `PORT` is ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut ChatConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("PORT") {
        match raw.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(_) => tracing::warn!(value = %raw, "Ignoring invalid PORT"),
        }
    }

    if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.llm.base_url = base_url;
    }
}

/// Read the API key from the environment. Blank values count as unset.
pub fn api_key_from_env<F>(lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_ENV)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}

/// Process environment lookup for [`apply_env_overrides`] and [`api_key_from_env`].
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
