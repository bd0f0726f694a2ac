//! Client configuration.
//!
//! Deserializable with serde so it can be embedded in a larger config file,
//! or read from the environment with `ClientConfig::from_env`.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Environment variable holding the pipeline API base URL.
pub const BASE_URL_ENV: &str = "PIPELINES_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn from_base_url(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(default_base_url),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_api() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:8888");
    }

    #[test]
    fn blank_env_value_falls_back_to_default() {
        assert_eq!(
            ClientConfig::from_base_url(Some("  ".to_string())),
            ClientConfig::default()
        );
        assert_eq!(ClientConfig::from_base_url(None), ClientConfig::default());
    }

    #[test]
    fn env_value_is_used_verbatim() {
        let config = ClientConfig::from_base_url(Some("http://ml-pipeline:8888".to_string()));
        assert_eq!(config.base_url, "http://ml-pipeline:8888");
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://example.com"}"#).unwrap();
        assert_eq!(config.base_url, "http://example.com");
    }
}
