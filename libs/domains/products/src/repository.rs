use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// All products, ascending by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    last_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product::new(id, input);

        self.products.write().await.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| ProductError::not_found(id))?;

        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_and_list_is_ordered() {
        let repo = InMemoryProductRepository::new();

        let a = repo.create(input("a", "1")).await.unwrap();
        let b = repo.create(input("b", "2")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        repo.delete(a.id).await.unwrap();
        let c = repo.create(input("c", "3")).await.unwrap();
        assert_eq!(c.id, 3, "ids are never reused");

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let err = repo.update(42, UpdateProduct::default()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(id) if id == "42"));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("a", "1")).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(repo.get_by_id(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();

        let product = repo.create(input("shared", "5")).await.unwrap();
        assert_eq!(other.get_by_id(product.id).await.unwrap(), Some(product));
    }
}
