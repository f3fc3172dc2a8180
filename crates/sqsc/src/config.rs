//! Configuration for the sqsc client

use secrecy::SecretString;
use std::time::Duration;

/// Default control-plane endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.squarescale.io";

/// Configuration for the sqsc client.
///
/// `token` is the only field without a usable default: [`crate::Client`]
/// refuses to build without one.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Control-plane base URL
    pub endpoint: String,

    /// Bearer token
    pub token: Option<SecretString>,

    /// Per-request timeout
    pub timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Delay between two fetches of a wait
    pub poll_interval: Duration,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            poll_interval: sqsc_core::poll::DEFAULT_INTERVAL,
            pool_max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// This will look for:
    /// - `SQSC_ENDPOINT` for the control-plane URL
    /// - `SQSC_TOKEN` for the bearer token
    /// - `SQSC_TIMEOUT` for the request timeout (in seconds)
    /// - `SQSC_POLL_INTERVAL` for the wait interval (in seconds)
    ///
    /// Unparseable numbers are ignored and the default kept.
    #[cfg(feature = "env")]
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    pub fn from_env() -> Self {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(endpoint) = env::var("SQSC_ENDPOINT")
            && !endpoint.trim().is_empty()
        {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Ok(token) = env::var("SQSC_TOKEN")
            && !token.is_empty()
        {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(timeout_str) = env::var("SQSC_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(interval_str) = env::var("SQSC_POLL_INTERVAL")
            && let Ok(interval_secs) = interval_str.parse::<u64>()
        {
            config.poll_interval = Duration::from_secs(interval_secs);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://www.squarescale.io");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_with_token() {
        let config = ClientConfig::with_token("t0k3n");
        assert_eq!(config.token.unwrap().expose_secret(), "t0k3n");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig::with_token("very-secret");
        assert!(!format!("{config:?}").contains("very-secret"));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("SQSC_ENDPOINT", Some("http://localhost:3000")),
                ("SQSC_TOKEN", Some("env-token")),
                ("SQSC_TIMEOUT", Some("15")),
                ("SQSC_POLL_INTERVAL", Some("1")),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.endpoint, "http://localhost:3000");
                assert_eq!(config.token.unwrap().expose_secret(), "env-token");
                assert_eq!(config.timeout, Duration::from_secs(15));
                assert_eq!(config.poll_interval, Duration::from_secs(1));
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_ignores_bad_numbers() {
        temp_env::with_vars(
            [
                ("SQSC_ENDPOINT", None),
                ("SQSC_TOKEN", Some("")),
                ("SQSC_TIMEOUT", Some("soon")),
                ("SQSC_POLL_INTERVAL", Some("-1")),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
                assert!(config.token.is_none());
                assert_eq!(config.timeout, Duration::from_secs(60));
                assert_eq!(config.poll_interval, Duration::from_secs(5));
            },
        );
    }
}
