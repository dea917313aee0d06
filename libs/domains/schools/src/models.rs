use chrono::{DateTime, Utc};
use domain_catalog_core::{slugify, validate_slug};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[schema(example = "0192f0c1-6b1e-7c3a-9a51-3f2d4e8b1c07")]
    pub id: String,
    #[schema(example = "Riverside High School")]
    pub name: String,
    /// Logo URL or storage key
    pub logo: Option<String>,
    #[schema(example = "riverside-high-school")]
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchool {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    #[schema(example = "Riverside High School")]
    pub name: String,
    #[validate(length(max = 500, message = "Logo must be at most 500 characters"))]
    pub logo: Option<String>,
    /// Derived from `name` when omitted
    #[validate(
        length(min = 1, max = 220, message = "Slug must be 1 to 220 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchool {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: Option<String>,
    /// `null` clears the logo
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Logo must be at most 500 characters"))]
    pub logo: Option<Option<String>>,
    #[validate(
        length(min = 1, max = 220, message = "Slug must be 1 to 220 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
}

impl School {
    pub fn new(input: CreateSchool, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            logo: input.logo,
            slug,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateSchool) {
        if let Some(name) = update.name {
            if update.slug.is_none() && name != self.name {
                self.slug = slugify(&name);
            }
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        self.updated_at = Utc::now();
    }
}
