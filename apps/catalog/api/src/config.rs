use axum_helpers::HttpConfig;
use core_config::{AppInfo, ConfigError, ConfigReport, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config`, `database`
/// and `axum-helpers` libraries
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub http: HttpConfig,
    /// `RUN_MIGRATIONS`, default true
    pub run_migrations: bool,
}

impl Config {
    /// Load every section, reporting all invalid or missing variables at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut report = ConfigReport::default();

        let environment = Environment::from_env();
        let server = report.take(ServerConfig::from_env());
        let database = report.take(PostgresConfig::from_env()); // Required - will fail if not set
        let http = report.take(HttpConfig::from_env());
        let run_migrations = report.take(env_parse("RUN_MIGRATIONS", true));

        report.finish()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            http,
            run_migrations,
        })
    }
}
