//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Conventional address of the RAG service when none is configured: the
/// local host on the service's default port.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Settings for reaching the remote RAG service.
///
/// Loaded from `config.toml` when present; every field falls back to its
/// default so a partial (or absent) file is always usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the RAG service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. Generous because chat answers wait on the
    /// retrieval pipeline and the model.
    pub request_timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Joins an endpoint path onto the base URL, tolerating a configured
    /// trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: ClientConfig = toml::from_str("base_url = \"http://rag.local:8000\"").unwrap();
        assert_eq!(config.base_url, "http://rag.local:8000");
        assert_eq!(config.request_timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig {
            base_url: "http://rag.local:8000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.endpoint("/chat/"), "http://rag.local:8000/chat/");
        assert_eq!(config.endpoint("login"), "http://rag.local:8000/login");
    }
}
