use chrono::Utc;
use domain_catalog_core::{resolve_slug, unsluggable_name};
use std::sync::Arc;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category, deriving the slug from the name when none is given
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input.validate()?;

        let slug = resolve_slug(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(CategoryError::Validation(unsluggable_name()));
        }

        self.repository.create(Category::new(input, slug)).await
    }

    /// Get a category by ID, including inactive ones
    pub async fn get_category(&self, id: &str) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    /// Active categories, newest first
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list_active().await
    }

    /// Apply a partial update to an existing category
    pub async fn update_category(
        &self,
        id: &str,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input.validate()?;

        let mut category = self.get_category(id).await?;
        category.apply_update(input);
        if category.slug.is_empty() {
            return Err(CategoryError::Validation(unsluggable_name()));
        }

        self.repository.update(category).await
    }

    /// Soft delete: clears `is_active`, the row stays readable by id
    pub async fn delete_category(&self, id: &str) -> CategoryResult<()> {
        let mut category = self.get_category(id).await?;
        category.is_active = false;
        category.updated_at = Utc::now();

        self.repository.update(category).await?;
        tracing::info!(category_id = %id, "Deactivated category");
        Ok(())
    }
}
