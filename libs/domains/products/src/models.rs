use chrono::{DateTime, Utc};
use domain_catalog_core::{slugify, validate_price, validate_slug};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    #[schema(example = "0192f0c1-6b1e-7c3a-9a51-3f2d4e8b1c07")]
    pub id: String,
    #[schema(example = "USB-C Cable 2m")]
    pub name: String,
    /// URL-friendly identifier, unique across products
    #[schema(example = "usb-c-cable-2m")]
    pub slug: String,
    /// Purchase cost, never negative
    #[schema(example = "4.50")]
    pub buying_price: Decimal,
    #[schema(example = "12.99")]
    pub sale_price: Decimal,
    /// Image URL or storage key
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    #[schema(example = "USB-C Cable 2m")]
    pub name: String,
    /// Derived from `name` when omitted
    #[validate(
        length(min = 1, max = 220, message = "Slug must be 1 to 220 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "4.50", default = "0")]
    pub buying_price: Decimal,
    #[validate(
        required(message = "Sale price is required"),
        custom(function = "validate_price")
    )]
    #[schema(required = true, example = "12.99")]
    pub sale_price: Option<Decimal>,
    #[validate(length(max = 500, message = "Image must be at most 500 characters"))]
    pub image: Option<String>,
}

/// DTO for updating a product; absent fields are left unchanged, `null`
/// clears an optional one
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 220, message = "Slug must be 1 to 220 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub buying_price: Option<Decimal>,
    #[validate(custom(function = "validate_price"))]
    pub sale_price: Option<Decimal>,
    /// `null` clears the image
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Image must be at most 500 characters"))]
    pub image: Option<Option<String>>,
}

impl Product {
    pub fn new(input: CreateProduct, slug: String, sale_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            slug,
            buying_price: input.buying_price,
            sale_price,
            image: input.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, re-deriving the slug on rename unless one is given
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            if update.slug.is_none() && name != self.name {
                self.slug = slugify(&name);
            }
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(buying_price) = update.buying_price {
            self.buying_price = buying_price;
        }
        if let Some(sale_price) = update.sale_price {
            self.sale_price = sale_price;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}
