use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{ProductError, ProductResult};
use crate::validation::ValidatedFields;

/// OpenAPI tag and JSON:API resource type
pub const TAG: &str = "products";

/// Product as stored and returned by the flat routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the store, never changes
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Super Product")]
    pub name: String,
    /// Decimal text exactly as accepted
    #[schema(example = "23.30")]
    pub price: String,
}

/// Validated input for a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProduct {
    pub name: String,
    pub price: String,
}

impl CreateProduct {
    /// Build from the output of the create rule-set.
    pub fn from_fields(fields: &ValidatedFields) -> ProductResult<Self> {
        let name = fields
            .get("name")
            .and_then(scalar_text)
            .ok_or_else(|| ProductError::Internal("validated payload has no name".to_string()))?;
        let price = fields
            .get("price")
            .and_then(decimal_text)
            .ok_or_else(|| ProductError::Internal("validated payload has no price".to_string()))?;

        Ok(Self { name, price })
    }
}

/// Validated changes to an existing product. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<String>,
}

impl UpdateProduct {
    /// Build from the output of the update rule-set.
    ///
    /// A null or blank name is ignored rather than stored.
    pub fn from_fields(fields: &ValidatedFields) -> Self {
        Self {
            name: fields
                .get("name")
                .and_then(scalar_text)
                .filter(|name| !name.trim().is_empty()),
            price: fields.get("price").and_then(decimal_text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

impl Product {
    pub fn new(id: i64, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

/// Text stored for a name value. Numbers keep their JSON spelling.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Normalized decimal text for a price that already passed `numeric`.
pub fn decimal_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
