//! Schools Domain
//!
//! Schools with an optional logo and a unique slug. Same layering as the
//! other catalog domains: handlers → service → repository → models.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{SchoolError, SchoolResult};
pub use handlers::ApiDoc;
pub use models::{CreateSchool, School, UpdateSchool};
pub use postgres::PgSchoolRepository;
pub use repository::{InMemorySchoolRepository, SchoolRepository};
pub use service::SchoolService;
