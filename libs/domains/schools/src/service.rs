use domain_catalog_core::{resolve_slug, unsluggable_name};
use std::sync::Arc;
use validator::Validate;

use crate::error::{SchoolError, SchoolResult};
use crate::models::{CreateSchool, School, UpdateSchool};
use crate::repository::SchoolRepository;

#[derive(Clone)]
pub struct SchoolService<R: SchoolRepository> {
    repository: Arc<R>,
}

impl<R: SchoolRepository> SchoolService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_school(&self, input: CreateSchool) -> SchoolResult<School> {
        input.validate()?;

        let slug = resolve_slug(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(SchoolError::Validation(unsluggable_name()));
        }

        self.repository.create(School::new(input, slug)).await
    }

    pub async fn get_school(&self, id: &str) -> SchoolResult<School> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(id.to_string()))
    }

    pub async fn list_schools(&self) -> SchoolResult<Vec<School>> {
        self.repository.list().await
    }

    pub async fn update_school(&self, id: &str, input: UpdateSchool) -> SchoolResult<School> {
        input.validate()?;

        let mut school = self.get_school(id).await?;
        school.apply_update(input);
        if school.slug.is_empty() {
            return Err(SchoolError::Validation(unsluggable_name()));
        }

        self.repository.update(school).await
    }

    pub async fn delete_school(&self, id: &str) -> SchoolResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(SchoolError::NotFound(id.to_string()))
        }
    }
}
