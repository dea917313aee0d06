use chrono::{DateTime, Utc};
use domain_catalog_core::{slugify, validate_hex_color, validate_slug};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Color assigned when a create request omits `color`.
pub const DEFAULT_COLOR: &str = "#6366F1";

fn default_color() -> Option<String> {
    Some(DEFAULT_COLOR.to_string())
}

fn default_active() -> bool {
    true
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    #[schema(example = "0192f0c1-6b1e-7c3a-9a51-3f2d4e8b1c07")]
    pub id: String,
    /// Display name, unique across categories
    #[schema(example = "Electronics")]
    pub name: String,
    /// URL-friendly identifier, unique across categories
    #[schema(example = "electronics")]
    pub slug: String,
    pub description: Option<String>,
    /// Hex color used by front-ends
    #[schema(example = "#6366F1")]
    pub color: Option<String>,
    /// Cleared when the category is deleted
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    #[schema(example = "Electronics")]
    pub name: String,
    /// Derived from `name` when omitted
    #[validate(
        length(min = 1, max = 120, message = "Slug must be 1 to 120 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    #[schema(example = "#6366F1")]
    pub color: Option<String>,
    #[serde(default = "default_active")]
    #[schema(default = true)]
    pub is_active: bool,
}

/// DTO for updating a category; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 120, message = "Slug must be 1 to 120 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    /// `null` clears the description
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<Option<String>>,
    /// `null` clears the color
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Category {
    /// Build a new active record from a create request and its resolved slug
    pub fn new(input: CreateCategory, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            slug,
            description: input.description,
            color: input.color,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update.
    ///
    /// A renamed category without an explicit slug gets its slug re-derived
    /// from the new name.
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            if update.slug.is_none() && name != self.name {
                self.slug = slugify(&name);
            }
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}
