use axum::http::HeaderValue;
use core_config::{ConfigError, ConfigReport, FromEnv, env_or_default, env_parse};

use super::cors::parse_origins;

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Token bucket settings applied per client IP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Tokens replenished per second
    pub per_second: u64,
    /// Bucket size
    pub burst: u32,
    /// Key on `X-Forwarded-For` / `X-Real-IP` instead of the peer address.
    /// Only safe behind a reverse proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst: 50,
            trust_proxy_headers: false,
        }
    }
}

/// Cross-cutting HTTP settings.
///
/// Environment variables:
/// - `FRONTEND_URL` (default: `http://localhost:3000`, comma separated)
/// - `RATE_LIMIT_PER_SECOND` (default: 10)
/// - `RATE_LIMIT_BURST` (default: 50)
/// - `TRUST_PROXY_HEADERS` (default: false)
/// - `BODY_LIMIT_BYTES` (default: 1048576)
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub allowed_origins: Vec<HeaderValue>,
    pub rate_limit: RateLimitConfig,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![HeaderValue::from_static(DEFAULT_FRONTEND_URL)],
            rate_limit: RateLimitConfig::default(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl FromEnv for HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = RateLimitConfig::default();
        let mut report = ConfigReport::default();

        let origins = env_or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL);
        let allowed_origins = match parse_origins(&origins) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                report.push(ConfigError::InvalidValue {
                    key: "FRONTEND_URL".to_string(),
                    details: "must name at least one origin".to_string(),
                });
                Vec::new()
            }
            Err(e) => {
                report.push(ConfigError::InvalidValue {
                    key: "FRONTEND_URL".to_string(),
                    details: e.to_string(),
                });
                Vec::new()
            }
        };

        let per_second = env_parse("RATE_LIMIT_PER_SECOND", defaults.per_second);
        if matches!(per_second, Ok(0)) {
            report.push(at_least_one("RATE_LIMIT_PER_SECOND"));
        }
        let per_second = report.take(per_second);

        let burst = env_parse("RATE_LIMIT_BURST", defaults.burst);
        if matches!(burst, Ok(0)) {
            report.push(at_least_one("RATE_LIMIT_BURST"));
        }
        let burst = report.take(burst);

        let trust_proxy_headers =
            report.take(env_parse("TRUST_PROXY_HEADERS", defaults.trust_proxy_headers));

        let body_limit_bytes =
            report.take(env_parse("BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES));

        report.finish()?;
        Ok(Self {
            allowed_origins,
            rate_limit: RateLimitConfig {
                per_second,
                burst,
                trust_proxy_headers,
            },
            body_limit_bytes,
        })
    }
}

fn at_least_one(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        details: "must be at least 1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        temp_env::with_vars_unset(
            [
                "FRONTEND_URL",
                "RATE_LIMIT_PER_SECOND",
                "RATE_LIMIT_BURST",
                "TRUST_PROXY_HEADERS",
                "BODY_LIMIT_BYTES",
            ],
            || {
                let config = HttpConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins, vec![DEFAULT_FRONTEND_URL]);
                assert_eq!(config.rate_limit, RateLimitConfig::default());
                assert_eq!(config.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
                assert!(!config.rate_limit.trust_proxy_headers);
            },
        );
    }

    #[test]
    fn test_proxy_headers_are_opt_in() {
        temp_env::with_var("TRUST_PROXY_HEADERS", Some("true"), || {
            let config = HttpConfig::from_env().unwrap();
            assert!(config.rate_limit.trust_proxy_headers);
        });

        temp_env::with_var("TRUST_PROXY_HEADERS", Some("sometimes"), || {
            let err = HttpConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("TRUST_PROXY_HEADERS"));
        });
    }

    #[test]
    fn test_http_config_multiple_origins() {
        temp_env::with_var(
            "FRONTEND_URL",
            Some("http://localhost:3000, https://shop.example.com"),
            || {
                let config = HttpConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins.len(), 2);
                assert_eq!(config.allowed_origins[1], "https://shop.example.com");
            },
        );
    }

    #[test]
    fn test_http_config_reports_all_problems() {
        temp_env::with_vars(
            [
                ("FRONTEND_URL", Some(" , ")),
                ("RATE_LIMIT_PER_SECOND", Some("0")),
                ("RATE_LIMIT_BURST", Some("lots")),
            ],
            || {
                let err = HttpConfig::from_env().unwrap_err();
                let message = err.to_string();
                assert!(message.contains("FRONTEND_URL"));
                assert!(message.contains("RATE_LIMIT_PER_SECOND"));
                assert!(message.contains("RATE_LIMIT_BURST"));
            },
        );
    }
}
