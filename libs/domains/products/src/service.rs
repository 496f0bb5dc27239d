use serde_json::Value;
use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::validation::{PayloadShape, RuleSet, validate};

/// Service layer for Product business logic
///
/// Takes raw JSON payloads so that validation runs against the request as sent,
/// in the field layout of the calling route.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

// Clones share one repository; R itself need not be Clone
impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_product(
        &self,
        payload: &Value,
        shape: PayloadShape,
    ) -> ProductResult<Product> {
        let fields = validate(payload, &RuleSet::create().with_shape(shape))
            .map_err(ProductError::Validation)?;
        let input = CreateProduct::from_fields(&fields)?;

        self.repository.create(input).await
    }

    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Existence is checked before the payload, so an unknown id is always a 404.
    pub async fn update_product(
        &self,
        id: i64,
        payload: &Value,
        shape: PayloadShape,
    ) -> ProductResult<Product> {
        let current = self.get_product(id).await?;

        let fields = validate(payload, &RuleSet::update().with_shape(shape))
            .map_err(ProductError::Validation)?;
        let input = UpdateProduct::from_fields(&fields);

        if input.is_empty() {
            return Ok(current);
        }

        self.repository.update(id, input).await
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::not_found(id));
        }

        Ok(())
    }
}
