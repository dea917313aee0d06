pub mod server;
pub mod tracing;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for environment variable '{key}': {details}")]
    InvalidValue { key: String, details: String },

    #[error("{} configuration error(s):\n{}", .0.len(), join_errors(.0))]
    Multiple(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ConfigError {
    /// Every individual error, with `Multiple` flattened.
    pub fn errors(&self) -> Vec<&ConfigError> {
        match self {
            ConfigError::Multiple(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            single => vec![single],
        }
    }
}

/// Collects configuration errors so startup can report all of them at once.
///
/// ```
/// use core_config::{env_parse, ConfigReport};
///
/// let mut report = ConfigReport::default();
/// let port: u16 = report.take(env_parse("CORE_CONFIG_DOCTEST_PORT", 8080));
/// assert!(report.finish().is_ok());
/// assert_eq!(port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct ConfigReport {
    errors: Vec<ConfigError>,
}

impl ConfigReport {
    /// Returns the loaded value, or records the error and returns `T::default()`.
    ///
    /// The fallback value is never observable: `finish` fails whenever an
    /// error was recorded.
    pub fn take<T: Default>(&mut self, result: Result<T, ConfigError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.push(err);
                T::default()
            }
        }
    }

    pub fn push(&mut self, err: ConfigError) {
        match err {
            ConfigError::Multiple(errors) => self.errors.extend(errors),
            single => self.errors.push(single),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(mut self) -> Result<(), ConfigError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ConfigError::Multiple(self.errors)),
        }
    }
}

/// Application runtime mode, read from `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Unknown values fall back to `Development`.
    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Environment::Test)
    }
}

/// Name and version of the running binary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

/// Parses an environment variable, using `default` when it is unset.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{e} (got '{raw}')"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_test_mode() {
        temp_env::with_var("APP_ENV", Some("test"), || {
            let env = Environment::from_env();
            assert!(env.is_test());
            assert_eq!(env.to_string(), "test");
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_required_blank_counts_as_missing() {
        temp_env::with_var("BLANK_REQUIRED", Some("   "), || {
            assert_eq!(
                env_required("BLANK_REQUIRED"),
                Err(ConfigError::MissingEnvVar("BLANK_REQUIRED".to_string()))
            );
        });
    }

    #[test]
    fn test_env_parse_uses_default_and_reports_bad_values() {
        temp_env::with_var_unset("PARSE_ME", || {
            assert_eq!(env_parse("PARSE_ME", 42u32), Ok(42));
        });

        temp_env::with_var("PARSE_ME", Some("forty-two"), || {
            let err = env_parse("PARSE_ME", 42u32).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PARSE_ME"));
            assert!(err.to_string().contains("forty-two"));
        });
    }

    #[test]
    fn test_report_collects_every_error() {
        let mut report = ConfigReport::default();
        let a: u16 = report.take(Err(ConfigError::MissingEnvVar("A".into())));
        let b: u16 = report.take(Ok(7));
        report.push(ConfigError::Multiple(vec![
            ConfigError::MissingEnvVar("B".into()),
            ConfigError::MissingEnvVar("C".into()),
        ]));

        assert_eq!((a, b), (0, 7));
        let err = report.finish().unwrap_err();
        assert_eq!(err.errors().len(), 3);

        let message = err.to_string();
        assert!(message.starts_with("3 configuration error(s)"));
        for key in ["'A'", "'B'", "'C'"] {
            assert!(message.contains(key), "missing {key} in {message}");
        }
    }

    #[test]
    fn test_report_single_error_is_not_wrapped() {
        let mut report = ConfigReport::default();
        report.push(ConfigError::MissingEnvVar("ONLY".into()));
        assert_eq!(
            report.finish(),
            Err(ConfigError::MissingEnvVar("ONLY".into()))
        );
    }

    #[test]
    fn test_app_info_macro_reads_cargo_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
