use domain_catalog_core::{resolve_slug, unsluggable_name};
use std::borrow::Cow;
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

fn missing_sale_price() -> ProductError {
    let mut errors = ValidationErrors::new();
    errors.add(
        "sale_price",
        ValidationError::new("required").with_message(Cow::Borrowed("Sale price is required")),
    );
    ProductError::Validation(errors)
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product, deriving the slug from the name when none is given
    pub async fn create_product(&self, mut input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let sale_price = input.sale_price.take().ok_or_else(missing_sale_price)?;
        let slug = resolve_slug(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(ProductError::Validation(unsluggable_name()));
        }

        self.repository
            .create(Product::new(input, slug, sale_price))
            .await
    }

    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// All products, newest first
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(input);
        if product.slug.is_empty() {
            return Err(ProductError::Validation(unsluggable_name()));
        }

        self.repository.update(product).await
    }

    /// Hard delete
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use rust_decimal_macros::dec;

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            slug: None,
            buying_price: dec!(0),
            sale_price: Some(dec!(19.99)),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_keeps_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|p| p.slug == "usb-c-cable-2m" && p.sale_price == dec!(19.99))
            .times(1)
            .returning(|p| Ok(p));

        let service = ProductService::new(mock_repo);
        let product = service
            .create_product(create_input("USB-C Cable 2m"))
            .await
            .unwrap();

        assert_eq!(product.slug, "usb-c-cable-2m");
    }

    #[tokio::test]
    async fn test_create_without_sale_price_is_rejected() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let mut input = create_input("Mug");
        input.sale_price = None;

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let mut input = create_input("Mug");
        input.buying_price = dec!(-0.01);

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .withf(|id| id == "missing")
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let err = service.delete_product("missing").await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_propagates_duplicate_slug() {
        let existing = Product::new(create_input("Mug"), "mug".into(), dec!(19.99));
        let id = existing.id.clone();

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_update()
            .returning(|p| Err(ProductError::DuplicateSlug(p.slug)));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(
                &id,
                UpdateProduct {
                    slug: Some("cup".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::DuplicateSlug(ref s) if s == "cup"));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product("nope").await,
            Err(ProductError::NotFound(_))
        ));
    }
}
