//! Client configuration loaded from the environment.

use std::time::Duration;

use url::Url;

use eventhub_shared::SUCCESS_STATUS_CODE;

/// Default API base URL (no trailing slash).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub const ENV_API_URL: &str = "EVENTHUB_API_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "EVENTHUB_REQUEST_TIMEOUT_MS";
pub const ENV_SUCCESS_CODE: &str = "EVENTHUB_SUCCESS_CODE";
pub const ENV_ACCESS_TOKEN: &str = "EVENTHUB_ACCESS_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub success_code: i64,
}

impl ClientConfig {
    /// Config for `api_base_url` with the default timeout and success code.
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            success_code: SUCCESS_STATUS_CODE,
        }
    }

    /// Load from process environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, url::ParseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced with their defaults rather
    /// than failing startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, url::ParseError> {
        let configured_url = lookup(ENV_API_URL).and_then(|raw| match Url::parse(raw.trim()) {
            Ok(url) if !url.cannot_be_a_base() => Some(url),
            Ok(_) => {
                tracing::warn!(value = %raw, "{} cannot be a base URL, using default", ENV_API_URL);
                None
            }
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Invalid {}, using default", ENV_API_URL);
                None
            }
        });
        let mut config = match configured_url {
            Some(url) => Self::new(url),
            None => Self::new(Url::parse(DEFAULT_API_URL)?),
        };

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.request_timeout = Duration::from_millis(ms),
                _ => tracing::warn!(
                    value = %raw,
                    "Invalid {}, using default of {}ms",
                    ENV_REQUEST_TIMEOUT_MS,
                    DEFAULT_REQUEST_TIMEOUT_MS
                ),
            }
        }

        if let Some(raw) = lookup(ENV_SUCCESS_CODE) {
            match raw.trim().parse::<i64>() {
                Ok(code) => config.success_code = code,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Invalid {}, using default of {}",
                    ENV_SUCCESS_CODE,
                    SUCCESS_STATUS_CODE
                ),
            }
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ClientConfig::from_lookup(|_| None).expect("default config");
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.success_code, 6000);
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://tickets.example.com/api/v2/"),
            (ENV_REQUEST_TIMEOUT_MS, "2500"),
            (ENV_SUCCESS_CODE, "200"),
        ]))
        .expect("config");
        assert_eq!(config.api_base_url.as_str(), "https://tickets.example.com/api/v2/");
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.success_code, 200);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "not a url"),
            (ENV_REQUEST_TIMEOUT_MS, "0"),
            (ENV_SUCCESS_CODE, "six thousand"),
        ]))
        .expect("config");
        let defaults = ClientConfig::from_lookup(|_| None).expect("default config");
        assert_eq!(config, defaults);
    }
}
