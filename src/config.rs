// src/config.rs
use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Absent key puts the service in fallback-only mode.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub inference_timeout: Option<Duration>,
    /// `None` keeps every entry for the lifetime of the process.
    pub cache_capacity: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            inference_timeout: None,
            cache_capacity: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = parse_var("BACKEND_PORT").unwrap_or(defaults.port);

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let gemini_model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.gemini_model);
        let gemini_api_base = env::var("GEMINI_API_BASE")
            .ok()
            .map(|b| b.trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or(defaults.gemini_api_base);

        let inference_timeout = parse_var::<u64>("INFERENCE_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let cache_capacity = parse_var::<usize>("CACHE_CAPACITY").filter(|cap| *cap > 0);

        Self {
            host,
            port,
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            inference_timeout,
            cache_capacity,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn inference_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Reads and parses an env var, warning and returning `None` on bad input.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.gemini_model, "gemini-2.0-flash-lite");
        assert!(!config.inference_enabled());
        assert!(config.cache_capacity.is_none());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("FOCUSFLOW_TEST_PORT", "not-a-port");
        assert_eq!(parse_var::<u16>("FOCUSFLOW_TEST_PORT"), None);
        env::set_var("FOCUSFLOW_TEST_PORT", " 8080 ");
        assert_eq!(parse_var::<u16>("FOCUSFLOW_TEST_PORT"), Some(8080));
        env::remove_var("FOCUSFLOW_TEST_PORT");
    }
}
