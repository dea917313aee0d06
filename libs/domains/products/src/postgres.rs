use async_trait::async_trait;
use database::DatabaseError;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

/// PostgreSQL-backed ProductRepository; slug uniqueness comes from `idx_products_slug`
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let slug = product.slug.clone();
        let active_model: entity::ActiveModel = product.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::from_database(e.into(), &slug))?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let slug = product.slug.clone();
        let active_model: entity::ActiveModel = product.into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::from_database(e.into(), &slug))?;

        tracing::info!(product_id = %model.id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}
