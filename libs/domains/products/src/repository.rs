use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a fully built product; a taken slug is `DuplicateSlug`
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// All products, newest first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Persist every field of an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Remove a product; `false` when nothing matched
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn slug_taken(products: &HashMap<String, Product>, candidate: &Product) -> bool {
    products
        .values()
        .any(|p| p.id != candidate.id && p.slug == candidate.slug)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if slug_taken(&products, &product) {
            return Err(ProductError::DuplicateSlug(product.slug));
        }

        products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id));
        }
        if slug_taken(&products, &product) {
            return Err(ProductError::DuplicateSlug(product.slug));
        }

        products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let removed = products.remove(id).is_some();

        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}
