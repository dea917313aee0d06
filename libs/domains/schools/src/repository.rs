use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{SchoolError, SchoolResult};
use crate::models::School;

/// Repository trait for School persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Insert a fully built school; a taken slug is `DuplicateSlug`
    async fn create(&self, school: School) -> SchoolResult<School>;

    async fn get_by_id(&self, id: &str) -> SchoolResult<Option<School>>;

    /// All schools, newest first
    async fn list(&self) -> SchoolResult<Vec<School>>;

    /// Persist every field of an existing school
    async fn update(&self, school: School) -> SchoolResult<School>;

    /// Remove a school; `false` when nothing matched
    async fn delete(&self, id: &str) -> SchoolResult<bool>;
}

/// In-memory implementation of SchoolRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySchoolRepository {
    schools: Arc<RwLock<HashMap<String, School>>>,
}

impl InMemorySchoolRepository {
    pub fn new() -> Self {
        Self {
            schools: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn slug_taken(schools: &HashMap<String, School>, candidate: &School) -> bool {
    schools
        .values()
        .any(|p| p.id != candidate.id && p.slug == candidate.slug)
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn create(&self, school: School) -> SchoolResult<School> {
        let mut schools = self.schools.write().await;

        if slug_taken(&schools, &school) {
            return Err(SchoolError::DuplicateSlug(school.slug));
        }

        schools.insert(school.id.clone(), school.clone());

        tracing::info!(school_id = %school.id, "Created school");
        Ok(school)
    }

    async fn get_by_id(&self, id: &str) -> SchoolResult<Option<School>> {
        let schools = self.schools.read().await;
        Ok(schools.get(id).cloned())
    }

    async fn list(&self) -> SchoolResult<Vec<School>> {
        let schools = self.schools.read().await;

        let mut result: Vec<School> = schools.values().cloned().collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update(&self, school: School) -> SchoolResult<School> {
        let mut schools = self.schools.write().await;

        if !schools.contains_key(&school.id) {
            return Err(SchoolError::NotFound(school.id));
        }
        if slug_taken(&schools, &school) {
            return Err(SchoolError::DuplicateSlug(school.slug));
        }

        schools.insert(school.id.clone(), school.clone());

        tracing::info!(school_id = %school.id, "Updated school");
        Ok(school)
    }

    async fn delete(&self, id: &str) -> SchoolResult<bool> {
        let mut schools = self.schools.write().await;
        let removed = schools.remove(id).is_some();

        if removed {
            tracing::info!(school_id = %id, "Deleted school");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateSchool;

    fn school(name: &str, slug: &str) -> School {
        let input = CreateSchool {
            name: name.to_string(),
            logo: None,
            slug: None,
        };
        School::new(input, slug.to_string())
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let repo = InMemorySchoolRepository::new();
        repo.create(school("Riverside", "riverside")).await.unwrap();

        let err = repo
            .create(school("Riverside Academy", "riverside"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::DuplicateSlug(ref s) if s == "riverside"));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = InMemorySchoolRepository::new();
        let created = repo.create(school("Hillcrest", "hillcrest")).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = InMemorySchoolRepository::new();
        let err = repo.update(school("Nowhere", "nowhere")).await.unwrap_err();
        assert!(matches!(err, SchoolError::NotFound(_)));
    }
}
