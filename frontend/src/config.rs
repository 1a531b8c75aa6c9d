use std::time::Duration;

pub const DEFAULT_API_ROOT: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variables the binary falls back to for its arguments.
pub const API_ROOT_VAR: &str = "ROUTE_API_ROOT";
pub const TOKEN_VAR: &str = "ROUTE_API_TOKEN";
pub const TIMEOUT_VAR: &str = "ROUTE_API_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API root must be an http(s) URL, got '{0}'")]
    InvalidApiRoot(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_root: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(
        api_root: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_root: normalize_api_root(api_root)?,
            token: token.filter(|token| !token.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub fn normalize_api_root(raw: &str) -> Result<String, ConfigError> {
    let root = raw.trim().trim_end_matches('/');
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(root.to_string())
    } else {
        Err(ConfigError::InvalidApiRoot(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_inputs() {
        let config =
            ClientConfig::new(" https://routes.example.org/api/ ", Some("secret".into()), 3)
                .unwrap();
        assert_eq!(config.api_root, "https://routes.example.org/api");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_token_is_no_token() {
        let config = ClientConfig::new(DEFAULT_API_ROOT, Some("  ".into()), DEFAULT_TIMEOUT_SECS)
            .unwrap();
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_invalid_api_root() {
        assert_eq!(
            normalize_api_root("localhost:8000"),
            Err(ConfigError::InvalidApiRoot("localhost:8000".into()))
        );
        assert_eq!(
            ClientConfig::new("ftp://routes", None, 5),
            Err(ConfigError::InvalidApiRoot("ftp://routes".into()))
        );
    }
}
