//! Declarative request validation.
//!
//! A [`RuleSet`] lists logical fields with ordered [`Rule`]s. [`validate`]
//! resolves each field through the rule-set's [`PayloadShape`], runs every
//! rule without short-circuiting, and returns either the validated fields or
//! all messages keyed by field path.
//!
//! ```
//! use domain_products::validation::{validate, PayloadShape, RuleSet};
//! use serde_json::json;
//!
//! let rules = RuleSet::create().with_shape(PayloadShape::JsonApi);
//! let payload = json!({"data": {"attributes": {"name": "Lapiz", "price": "0"}}});
//!
//! let errors = validate(&payload, &rules).unwrap_err();
//! assert_eq!(
//!     errors.get("data.attributes.price").unwrap(),
//!     &["El precio del articulo es menor o igual a 0".to_string()]
//! );
//! ```

pub mod path;
mod rules;
mod ruleset;

pub use rules::{Rule, as_number, parse_decimal};
pub use ruleset::{FieldRules, NAME_LABEL, PRICE_LABEL, RuleSet};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Where logical fields live inside a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadShape {
    /// `{"name": ..., "price": ...}`
    #[default]
    Flat,
    /// `{"data": {"type": "products", "attributes": {"name": ..., "price": ...}}}`
    JsonApi,
}

impl PayloadShape {
    pub fn path(&self, field: &str) -> String {
        match self {
            PayloadShape::Flat => field.to_string(),
            PayloadShape::JsonApi => format!("data.attributes.{}", field),
        }
    }
}

/// Messages per field path, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Fields that passed validation, keyed by logical name.
///
/// Only fields declared in the rule-set and present in the payload appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFields(BTreeMap<&'static str, Value>);

impl ValidatedFields {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check `payload` against `ruleset`.
///
/// Absent fields are judged only by [`Rule::Required`]. Unknown fields are ignored.
pub fn validate(payload: &Value, ruleset: &RuleSet) -> Result<ValidatedFields, FieldErrors> {
    let shape = ruleset.shape();
    let mut errors = FieldErrors::new();
    let mut validated = BTreeMap::new();

    for field in ruleset.fields() {
        let path = shape.path(field.field);
        let value = path::lookup(payload, &path);

        for rule in field.rules() {
            if value.is_none() && !rule.applies_when_absent() {
                continue;
            }
            if !rule.passes(value) {
                errors.add(path.as_str(), field.message(rule));
            }
        }

        if let Some(value) = value {
            validated.insert(field.field, value.clone());
        }
    }

    if errors.is_empty() {
        Ok(ValidatedFields(validated))
    } else {
        tracing::debug!(%errors, "Payload failed validation");
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAME_MISSING: &str = "El nombre del articulo no es enviado en la solicitud";
    const PRICE_MISSING: &str = "El precio del articulo no es enviado en la solicitud";
    const PRICE_NAN: &str = "El precio del articulo no es un número";
    const PRICE_NAN_UPDATE: &str = "El precio del articulo debe ser un número";
    const PRICE_NOT_POSITIVE: &str = "El precio del articulo es menor o igual a 0";

    #[test]
    fn test_payload_shape_paths() {
        assert_eq!(PayloadShape::Flat.path("price"), "price");
        assert_eq!(PayloadShape::JsonApi.path("price"), "data.attributes.price");
    }

    #[test]
    fn test_create_valid_payload() {
        let payload = json!({"name": "Super Product", "price": "23.30", "color": "red"});
        let fields = validate(&payload, &RuleSet::create()).unwrap();

        assert_eq!(fields.get("name"), Some(&json!("Super Product")));
        assert_eq!(fields.get("price"), Some(&json!("23.30")));
        assert!(!fields.contains("color"));
    }

    #[test]
    fn test_create_missing_name_has_single_message() {
        let payload = json!({"price": "10"});
        let errors = validate(&payload, &RuleSet::create()).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name").unwrap(), &[NAME_MISSING.to_string()]);
    }

    #[test]
    fn test_create_empty_payload_reports_both_fields() {
        let errors = validate(&json!({}), &RuleSet::create()).unwrap_err();

        assert_eq!(errors.get("name").unwrap(), &[NAME_MISSING.to_string()]);
        // Numeric rules are skipped for an absent price
        assert_eq!(errors.get("price").unwrap(), &[PRICE_MISSING.to_string()]);
    }

    #[test]
    fn test_create_non_numeric_price_reports_both_rules() {
        let payload = json!({"name": "Lapiz", "price": "abc"});
        let errors = validate(&payload, &RuleSet::create()).unwrap_err();

        assert_eq!(
            errors.get("price").unwrap(),
            &[PRICE_NAN.to_string(), PRICE_NOT_POSITIVE.to_string()]
        );
    }

    #[test]
    fn test_create_non_positive_price_reports_only_gt_rule() {
        for price in [json!("0"), json!(-5), json!("-0.01")] {
            let payload = json!({"name": "Lapiz", "price": price});
            let errors = validate(&payload, &RuleSet::create()).unwrap_err();

            assert_eq!(
                errors.get("price").unwrap(),
                &[PRICE_NOT_POSITIVE.to_string()]
            );
        }
    }

    #[test]
    fn test_create_empty_string_price_fails_every_rule() {
        let payload = json!({"name": "Lapiz", "price": ""});
        let errors = validate(&payload, &RuleSet::create()).unwrap_err();

        assert_eq!(
            errors.get("price").unwrap(),
            &[
                PRICE_MISSING.to_string(),
                PRICE_NAN.to_string(),
                PRICE_NOT_POSITIVE.to_string()
            ]
        );
    }

    #[test]
    fn test_update_without_price_passes() {
        let fields = validate(&json!({}), &RuleSet::update()).unwrap();
        assert!(fields.is_empty());

        let fields = validate(&json!({"name": "Nuevo"}), &RuleSet::update()).unwrap();
        assert_eq!(fields.get("name"), Some(&json!("Nuevo")));
        assert!(!fields.contains("price"));
    }

    #[test]
    fn test_update_non_numeric_price() {
        let payload = json!({"price": "cheap"});
        let errors = validate(&payload, &RuleSet::update()).unwrap_err();

        assert_eq!(
            errors.get("price").unwrap(),
            &[PRICE_NAN_UPDATE.to_string(), PRICE_NOT_POSITIVE.to_string()]
        );
    }

    #[test]
    fn test_update_non_positive_price_reports_only_gt_rule() {
        for price in [json!("-3"), json!(0), json!("0.00")] {
            let errors = validate(&json!({"price": price}), &RuleSet::update()).unwrap_err();

            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get("price").unwrap(),
                &[PRICE_NOT_POSITIVE.to_string()]
            );
        }
    }

    #[test]
    fn test_update_null_price_is_validated() {
        let payload = json!({"price": null});
        let errors = validate(&payload, &RuleSet::update()).unwrap_err();
        assert_eq!(errors.get("price").unwrap().len(), 2);
    }

    #[test]
    fn test_json_api_paths_are_reported_verbatim() {
        let rules = RuleSet::create().with_shape(PayloadShape::JsonApi);
        let payload = json!({"data": {"type": "products", "attributes": {"price": "x"}}});

        let errors = validate(&payload, &rules).unwrap_err();
        assert_eq!(
            errors.get("data.attributes.name").unwrap(),
            &[NAME_MISSING.to_string()]
        );
        assert_eq!(errors.get("data.attributes.price").unwrap().len(), 2);
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_json_api_rules_ignore_flat_fields() {
        let rules = RuleSet::create().with_shape(PayloadShape::JsonApi);
        let errors = validate(&json!({"name": "Lapiz", "price": "3"}), &rules).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_non_object_payload_has_no_fields() {
        let errors = validate(&json!([1, 2, 3]), &RuleSet::create()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("price", "first");
        errors.add("price", "second");

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"price": ["first", "second"]})
        );
        assert_eq!(errors.to_string(), "invalid fields: price");
    }
}
