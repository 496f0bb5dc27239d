//! Shared test utilities for the products workspace
//!
//! - `TestDatabase`: PostgreSQL container with the schema migrated (feature: "postgres")
//! - `TestDataBuilder`: Deterministic product names and prices
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.product_name("main");
//!     let price = builder.price();
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Seeded from the test name so reruns produce the same rows.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique product name, e.g. `"test-product-12345-main"`.
    pub fn product_name(&self, suffix: &str) -> String {
        format!("test-product-{}-{}", self.seed, suffix)
    }

    /// Positive price with two decimals, as the API stores it.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let price = TestDataBuilder::new(7).price();
    /// assert!(price.parse::<f64>().unwrap() > 0.0);
    /// ```
    pub fn price(&self) -> String {
        let cents = self.seed % 100_000 + 1;
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a decimal string survived storage unchanged
    pub fn assert_price_eq(actual: &str, expected: &str) {
        assert_eq!(
            actual, expected,
            "price changed in storage: expected {:?}, got {:?}",
            expected, actual
        );
    }
}
