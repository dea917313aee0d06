use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CategoryError, CategoryResult};
use crate::models::Category;

/// Repository trait for Category persistence
///
/// Implementations enforce uniqueness of `name` and `slug` and report
/// violations as [`CategoryError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a fully built category
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    /// Get a category by ID, active or not
    async fn get_by_id(&self, id: &str) -> CategoryResult<Option<Category>>;

    /// Active categories, newest first
    async fn list_active(&self) -> CategoryResult<Vec<Category>>;

    /// Persist every field of an existing category
    async fn update(&self, category: Category) -> CategoryResult<Category>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<String, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn check_unique<'a>(
    mut existing: impl Iterator<Item = &'a Category>,
    candidate: &Category,
) -> CategoryResult<()> {
    existing.try_for_each(|c| {
        if c.id == candidate.id {
            Ok(())
        } else if c.name == candidate.name {
            Err(CategoryError::Conflict(format!(
                "Category with name '{}' already exists",
                candidate.name
            )))
        } else if c.slug == candidate.slug {
            Err(CategoryError::Conflict(format!(
                "Category with slug '{}' already exists",
                candidate.slug
            )))
        } else {
            Ok(())
        }
    })
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;
        check_unique(categories.values(), &category)?;

        categories.insert(category.id.clone(), category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: &str) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(id).cloned())
    }

    async fn list_active(&self) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if !categories.contains_key(&category.id) {
            return Err(CategoryError::NotFound(category.id));
        }
        check_unique(categories.values(), &category)?;

        categories.insert(category.id.clone(), category.clone());

        tracing::info!(category_id = %category.id, "Updated category");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCategory;

    fn category(name: &str, slug: &str) -> Category {
        let input = CreateCategory {
            name: name.to_string(),
            slug: None,
            description: None,
            color: None,
            is_active: true,
        };
        Category::new(input, slug.to_string())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.create(category("Books", "books")).await.unwrap();

        let found = repo.get_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_and_slug_conflict() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(category("Books", "books")).await.unwrap();

        let err = repo.create(category("Books", "other")).await.unwrap_err();
        assert!(matches!(err, CategoryError::Conflict(ref m) if m.contains("name")));

        let err = repo.create(category("Novels", "books")).await.unwrap_err();
        assert!(matches!(err, CategoryError::Conflict(ref m) if m.contains("slug")));
    }

    #[tokio::test]
    async fn test_list_active_hides_inactive_and_orders_newest_first() {
        let repo = InMemoryCategoryRepository::new();
        let first = repo.create(category("A", "a")).await.unwrap();
        let second = repo.create(category("B", "b")).await.unwrap();
        let mut hidden = repo.create(category("C", "c")).await.unwrap();

        hidden.is_active = false;
        repo.update(hidden).await.unwrap();

        let ids: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let err = repo.update(category("Ghost", "ghost")).await.unwrap_err();
        assert!(matches!(err, CategoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_into_taken_slug_conflicts() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(category("A", "a")).await.unwrap();
        let mut b = repo.create(category("B", "b")).await.unwrap();

        b.slug = "a".into();
        let err = repo.update(b).await.unwrap_err();
        assert!(matches!(err, CategoryError::Conflict(_)));
    }
}
