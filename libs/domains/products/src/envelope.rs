//! Response bodies: error envelopes and the flat / JSON:API resource shapes.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Product, TAG};
use crate::validation::{FieldErrors, PayloadShape};

pub const VALIDATION_CODE: &str = "ERROR-1";
pub const NOT_FOUND_CODE: &str = "ERROR-2";
pub const NOT_FOUND_MESSAGE: &str = "No hay un producto con ese ID";

/// Body of a domain error response: `{"errors": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    pub errors: ErrorEnvelope,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = "ERROR-1")]
    pub code: String,
    #[schema(example = "Unprocessable Entity")]
    pub title: String,
    pub message: ErrorMessage,
}

/// Single text for not-found, per-field lists for validation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Fields(FieldErrors),
}

impl ErrorEnvelope {
    pub fn into_body(self) -> ErrorBody {
        ErrorBody { errors: self }
    }
}

pub fn format_not_found() -> ErrorEnvelope {
    ErrorEnvelope {
        code: NOT_FOUND_CODE.to_string(),
        title: "Not Found".to_string(),
        message: ErrorMessage::Text(NOT_FOUND_MESSAGE.to_string()),
    }
}

/// Field paths are kept exactly as the validator reported them.
pub fn format_validation(errors: FieldErrors) -> ErrorEnvelope {
    ErrorEnvelope {
        code: VALIDATION_CODE.to_string(),
        title: "Unprocessable Entity".to_string(),
        message: ErrorMessage::Fields(errors),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductAttributes {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResourceLink {
    #[serde(rename = "self")]
    #[schema(example = "http://localhost:8080/api/v2/products/1")]
    pub self_: String,
}

/// JSON:API resource object for one product.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductResource {
    #[serde(rename = "type")]
    #[schema(example = "products")]
    pub kind: &'static str,
    pub id: i64,
    pub attributes: ProductAttributes,
    pub link: ResourceLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductDocument {
    pub data: ProductResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductCollectionDocument {
    pub data: Vec<ProductResource>,
}

/// A single product in either convention.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProductBody {
    Flat(Product),
    JsonApi(ProductDocument),
}

/// A product list in either convention.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProductListBody {
    Flat(Vec<Product>),
    JsonApi(ProductCollectionDocument),
}

/// Renders products for one route convention.
#[derive(Debug, Clone)]
pub struct ResourceFormatter {
    shape: PayloadShape,
    /// Base of `self` links, without trailing slash
    link_base: String,
}

impl ResourceFormatter {
    pub fn new(shape: PayloadShape, link_base: impl Into<String>) -> Self {
        Self {
            shape,
            link_base: link_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn flat() -> Self {
        Self::new(PayloadShape::Flat, "")
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    pub fn resource(&self, product: Product) -> ProductResource {
        ProductResource {
            kind: TAG,
            link: ResourceLink {
                self_: format!("{}/{}", self.link_base, product.id),
            },
            id: product.id,
            attributes: ProductAttributes {
                name: product.name,
                price: product.price,
            },
        }
    }

    pub fn one(&self, product: Product) -> ProductBody {
        match self.shape {
            PayloadShape::Flat => ProductBody::Flat(product),
            PayloadShape::JsonApi => ProductBody::JsonApi(ProductDocument {
                data: self.resource(product),
            }),
        }
    }

    pub fn many(&self, products: Vec<Product>) -> ProductListBody {
        match self.shape {
            PayloadShape::Flat => ProductListBody::Flat(products),
            PayloadShape::JsonApi => ProductListBody::JsonApi(ProductCollectionDocument {
                data: products.into_iter().map(|p| self.resource(p)).collect(),
            }),
        }
    }
}
