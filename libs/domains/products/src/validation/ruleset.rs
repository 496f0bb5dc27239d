use super::{PayloadShape, Rule};

pub const NAME_LABEL: &str = "nombre del articulo";
pub const PRICE_LABEL: &str = "precio del articulo";

const MISSING: &str = "El :attribute no es enviado en la solicitud";
const NOT_A_NUMBER: &str = "El :attribute no es un número";
const MUST_BE_A_NUMBER: &str = "El :attribute debe ser un número";
const NOT_POSITIVE: &str = "El :attribute es menor o igual a 0";

/// Rules for one logical field, in evaluation order.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub label: &'static str,
    rules: Vec<(Rule, Option<&'static str>)>,
}

impl FieldRules {
    /// A field with no rules. It is still carried into the validated output.
    pub fn new(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            rules: Vec::new(),
        }
    }

    /// Append a rule rendered with its default template.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push((rule, None));
        self
    }

    /// Append a rule with a custom `:attribute` template.
    pub fn rule_with_message(mut self, rule: Rule, template: &'static str) -> Self {
        self.rules.push((rule, Some(template)));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().map(|(rule, _)| *rule)
    }

    /// Message for a failed `rule`, with the label substituted.
    pub fn message(&self, rule: Rule) -> String {
        let template = self
            .rules
            .iter()
            .find(|(r, _)| *r == rule)
            .and_then(|(_, template)| *template)
            .unwrap_or_else(|| rule.default_template());

        template.replace(":attribute", self.label)
    }
}

/// Per-operation rule declarations, bound to one payload shape.
#[derive(Debug, Clone)]
pub struct RuleSet {
    shape: PayloadShape,
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self {
            shape: PayloadShape::Flat,
            fields,
        }
    }

    /// Name is required; price is required, numeric and positive.
    pub fn create() -> Self {
        Self::new(vec![
            FieldRules::new("name", NAME_LABEL).rule_with_message(Rule::Required, MISSING),
            FieldRules::new("price", PRICE_LABEL)
                .rule_with_message(Rule::Required, MISSING)
                .rule_with_message(Rule::Numeric, NOT_A_NUMBER)
                .rule_with_message(Rule::GreaterThanZero, NOT_POSITIVE),
        ])
    }

    /// Price is optional but numeric and positive when sent; name is unconstrained.
    pub fn update() -> Self {
        Self::new(vec![
            FieldRules::new("name", NAME_LABEL),
            FieldRules::new("price", PRICE_LABEL)
                .rule_with_message(Rule::Numeric, MUST_BE_A_NUMBER)
                .rule_with_message(Rule::GreaterThanZero, NOT_POSITIVE),
        ])
    }

    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }
}
