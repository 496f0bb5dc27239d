//! Products Domain
//!
//! CRUD over a single `products` table with declarative request validation
//! and two response conventions (flat objects and JSON:API documents).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, payload/id extractors, audit log
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐    ┌────────────┐
//! │   Service   │ ─→ │ Validation │  ← rule-sets per operation
//! └──────┬──────┘    └────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and Postgres implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, inputs, sea-orm entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//!
//! let app = axum::Router::new()
//!     .merge(handlers::flat_router(service.clone(), "/products"))
//!     .merge(handlers::json_api_router(
//!         service,
//!         "/v2/products",
//!         "http://localhost:8080/api/v2/products",
//!     ));
//! ```

pub mod entity;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use envelope::{ErrorEnvelope, ResourceFormatter, format_not_found, format_validation};
pub use error::{ErrorKind, ProductError, ProductResult};
pub use models::{CreateProduct, Product, TAG, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use validation::{FieldErrors, PayloadShape, RuleSet, ValidatedFields, validate};
