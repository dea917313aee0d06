//! Database library providing PostgreSQL connectivity for the catalog services
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config(config).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//! ```
//!
//! Repositories convert `sea_orm::DbErr` into [`DatabaseError`], which
//! singles out uniqueness violations so handlers can answer 409 instead of 500.

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
