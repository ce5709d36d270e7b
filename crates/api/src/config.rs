use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;
use sjaplus_core::upload::MAX_REQUEST_BYTES;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be a valid {expected}, got {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the production deployment layout.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory for submitted applications.
    pub apply_dir: PathBuf,
    /// Root directory for approved avatar/poster images.
    pub display_dir: PathBuf,
    /// Ceiling for a whole multipart submission body, in bytes.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `BACKEND_PORT`         | `8080`                   |
    /// | `CORS_ORIGINS`         | `https://sjaplus.top`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `APPLY_DIR`            | `./var/project-apply`    |
    /// | `DISPLAY_DIR`          | `./var/project-display`  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_origins = env_or("CORS_ORIGINS", "https://sjaplus.top")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError {
                    var: "CORS_ORIGINS",
                    expected: "origin list",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("BACKEND_PORT", 8080, "u16")?,
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30, "u64")?,
            apply_dir: env_or("APPLY_DIR", "./var/project-apply").into(),
            display_dir: env_or("DISPLAY_DIR", "./var/project-display").into(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", MAX_REQUEST_BYTES, "byte count")?,
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    parse_value(var, std::env::var(var).ok(), default, expected)
}

/// Parse a raw variable value, or fall back to `default` when unset.
fn parse_value<T: FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            var,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_to_default_when_unset() {
        let port: u16 = parse_env("SJAPLUS_TEST_UNSET_PORT", 8080, "u16").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn unparsable_value_is_rejected_not_defaulted() {
        let err = parse_value::<u16>("BACKEND_PORT", Some("http".into()), 8080, "u16").unwrap_err();
        assert_eq!(err.var, "BACKEND_PORT");
        assert_eq!(err.value, "http");

        let err =
            parse_value::<u16>("BACKEND_PORT", Some("70000".into()), 8080, "u16").unwrap_err();
        assert_eq!(err.expected, "u16");

        let err = parse_value::<usize>("MAX_UPLOAD_BYTES", Some("10MB".into()), 1, "byte count")
            .unwrap_err();
        assert_eq!(err.var, "MAX_UPLOAD_BYTES");
    }

    #[test]
    fn set_value_is_trimmed_and_parsed() {
        let secs: u64 = parse_value("REQUEST_TIMEOUT_SECS", Some(" 45 ".into()), 30, "u64").unwrap();
        assert_eq!(secs, 45);
    }

    #[test]
    fn parse_env_rejects_unparsable_variable() {
        std::env::set_var("SJAPLUS_TEST_BAD_PORT", "not-a-port");
        let result = parse_env::<u16>("SJAPLUS_TEST_BAD_PORT", 8080, "u16");
        std::env::remove_var("SJAPLUS_TEST_BAD_PORT");
        assert!(result.is_err());
    }

    #[test]
    fn config_error_names_variable() {
        let err = ConfigError {
            var: "BACKEND_PORT",
            expected: "u16",
            value: "http".into(),
        };
        assert_eq!(err.to_string(), r#"BACKEND_PORT must be a valid u16, got "http""#);
    }
}
