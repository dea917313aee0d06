#[cfg(feature = "postgres")]
use sea_orm::{DbErr, SqlErr};

/// Unified database error type for all database operations
///
/// Constraint violations are classified into their own variants so callers
/// can map them to domain errors without inspecting driver messages.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A unique index or constraint rejected the write
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint rejected the write
    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    /// The targeted row does not exist (or vanished before the write)
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Any other PostgreSQL error (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(DbErr),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation(_))
    }
}

#[cfg(feature = "postgres")]
impl From<DbErr> for DatabaseError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                return DatabaseError::UniqueViolation(detail);
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return DatabaseError::ForeignKeyViolation(detail);
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(what) => DatabaseError::RecordNotFound(what),
            DbErr::RecordNotUpdated => {
                DatabaseError::RecordNotFound("no row matched the update".to_string())
            }
            other => DatabaseError::Postgres(other),
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
