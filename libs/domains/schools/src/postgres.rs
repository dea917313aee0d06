use async_trait::async_trait;
use database::DatabaseError;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{SchoolError, SchoolResult},
    models::School,
    repository::SchoolRepository,
};

/// PostgreSQL-backed SchoolRepository; slug uniqueness comes from `idx_schools_slug`
#[derive(Clone)]
pub struct PgSchoolRepository {
    db: DatabaseConnection,
}

impl PgSchoolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SchoolRepository for PgSchoolRepository {
    async fn create(&self, school: School) -> SchoolResult<School> {
        let slug = school.slug.clone();
        let active_model: entity::ActiveModel = school.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_database(e.into(), &slug))?;

        tracing::info!(school_id = %model.id, "Created school");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: &str) -> SchoolResult<Option<School>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> SchoolResult<Vec<School>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, school: School) -> SchoolResult<School> {
        let slug = school.slug.clone();
        let active_model: entity::ActiveModel = school.into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_database(e.into(), &slug))?;

        tracing::info!(school_id = %model.id, "Updated school");
        Ok(model.into())
    }

    async fn delete(&self, id: &str) -> SchoolResult<bool> {
        let result = entity::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected > 0 {
            tracing::info!(school_id = %id, "Deleted school");
        }
        Ok(result.rows_affected > 0)
    }
}
