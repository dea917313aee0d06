//! Custom extractors for Axum handlers.
//!
//! Both extractors parse first, then run `validator` rules, and reject with
//! an [`AppError`](crate::errors::AppError) so every failure shares the JSON
//! error envelope. Handlers receive the parsed, validated value.

pub mod validated_json;
pub mod validated_path;

pub use validated_json::ValidatedJson;
pub use validated_path::ValidatedPath;
