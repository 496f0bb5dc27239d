use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// A single predicate applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and not empty
    Required,
    /// A JSON number or a decimal string
    Numeric,
    /// Numeric and strictly positive
    GreaterThanZero,
}

impl Rule {
    /// Whether an absent field is judged by this rule at all.
    pub fn applies_when_absent(&self) -> bool {
        matches!(self, Rule::Required)
    }

    pub fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Rule::Required => value.is_some_and(is_filled),
            Rule::Numeric => value.is_some_and(|v| as_number(v).is_some()),
            Rule::GreaterThanZero => value.and_then(as_number).is_some_and(|n| n > 0.0),
        }
    }

    /// Message used when a field declares no template for this rule.
    pub fn default_template(&self) -> &'static str {
        match self {
            Rule::Required => "El campo :attribute es obligatorio",
            Rule::Numeric => "El campo :attribute debe ser un número",
            Rule::GreaterThanZero => "El campo :attribute debe ser mayor que 0",
        }
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Numeric reading of a JSON value, if it has one.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal pattern is valid")
});

/// Parse a decimal string after trimming.
///
/// Stricter than `f64::from_str`, which would also take `NaN` and `inf`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if !DECIMAL.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
