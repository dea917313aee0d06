//! Shared building blocks for the catalog resource domains
//!
//! - [`slug`]: the name → slug rule every resource uses
//! - [`validation`]: custom `validator` rules (hex colours, price
//!   bounds, slug shape)
//! - [`params`]: path parameters and response bodies common to all routes

pub mod params;
pub mod slug;
pub mod validation;

pub use params::{IdParams, MessageResponse};
pub use slug::{resolve_slug, slugify};
pub use validation::{
    PRICE_LIMIT, PRICE_SCALE, unsluggable_name, validate_hex_color, validate_non_negative,
    validate_price, validate_slug,
};
