use async_trait::async_trait;
use database::DatabaseError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::Category,
    repository::CategoryRepository,
};

/// PostgreSQL-backed CategoryRepository
///
/// Uniqueness is enforced by the `idx_categories_name` and
/// `idx_categories_slug` indexes, so concurrent writers still get a
/// conflict rather than a duplicate row.
#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn write_error(err: DbErr, category: &Category) -> CategoryError {
    classify_write_error(DatabaseError::from(err), category)
}

/// Name the field whose unique index fired. Violations of any other index
/// fall back to the generic conflict from `From<DatabaseError>`.
fn classify_write_error(err: DatabaseError, category: &Category) -> CategoryError {
    match err {
        DatabaseError::UniqueViolation(detail) if detail.contains("idx_categories_name") => {
            CategoryError::Conflict(format!(
                "Category with name '{}' already exists",
                category.name
            ))
        }
        DatabaseError::UniqueViolation(detail) if detail.contains("idx_categories_slug") => {
            CategoryError::Conflict(format!(
                "Category with slug '{}' already exists",
                category.slug
            ))
        }
        DatabaseError::RecordNotFound(_) => CategoryError::NotFound(category.id.clone()),
        other => other.into(),
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = category.clone().into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &category))?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: &str) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(model.map(Into::into))
    }

    async fn list_active(&self) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .filter(entity::Column::IsActive.eq(true))
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = category.clone().into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, &category))?;

        tracing::info!(category_id = %model.id, "Updated category");
        Ok(model.into())
    }
}
