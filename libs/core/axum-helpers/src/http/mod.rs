//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - Per-client rate limiting
//!
//! Settings come from [`HttpConfig`]; [`crate::server::create_router`]
//! installs every layer in the fixed order documented there.

pub mod config;
pub mod cors;
pub mod rate_limit;
pub mod security;

pub use config::{HttpConfig, RateLimitConfig};
pub use cors::{create_cors_layer, parse_origins};
pub use rate_limit::{ClientIpKeyExtractor, RateLimitError, apply_rate_limit};
pub use security::security_headers;
