//! Application state management.
//!
//! Shared by the readiness check and the domain routers. Each domain gets
//! its own repository built from the pooled connection; cloning the state
//! only clones the pool handle.

use database::postgres::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self { config, db }
    }
}
