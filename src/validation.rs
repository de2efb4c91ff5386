//! Field-level validation for inbound feature payloads
//!
//! Rules are declared as a table and evaluated against the raw JSON object
//! before anything reaches the store. Every violated field is reported, not
//! just the first one.

use serde_json::{Map, Value};

use crate::error::Violation;
use crate::types::{FeatureStatus, NewFeature};
use crate::{Error, Result};

/// Constraints for one string field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldRule {
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            required: true,
            min_length: None,
            max_length: None,
            allowed: None,
        }
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    fn check(&self, value: Option<&Value>) -> Option<Violation> {
        let value = match value {
            None | Some(Value::Null) => {
                return self
                    .required
                    .then(|| Violation::new(self.field, "field required"));
            }
            Some(value) => value,
        };

        let Some(text) = value.as_str() else {
            return Some(Violation::new(self.field, "must be a string"));
        };

        let len = text.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Some(Violation::new(
                    self.field,
                    format!("must be at least {min} character(s) long"),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Some(Violation::new(
                    self.field,
                    format!("must be at most {max} character(s) long"),
                ));
            }
        }
        if let Some(allowed) = self.allowed {
            if !allowed.contains(&text) {
                return Some(Violation::new(
                    self.field,
                    format!("must be one of: {}", allowed.join(", ")),
                ));
            }
        }

        None
    }
}

const STATUS_NAMES: &[&str] = &["active", "inactive", "deprecated"];

/// Rules applied to `POST /api/v1/features` bodies
pub const FEATURE_RULES: &[FieldRule] = &[
    FieldRule::required("name").length(1, 100),
    FieldRule::required("description").length(1, 500),
    FieldRule::required("status").one_of(STATUS_NAMES),
];

/// Check `payload` against `rules`, collecting every violation.
pub fn validate(payload: &Map<String, Value>, rules: &[FieldRule]) -> Result<()> {
    let violations: Vec<Violation> = rules
        .iter()
        .filter_map(|rule| rule.check(payload.get(rule.field)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations))
    }
}

/// Validate a create payload and convert it into a [`NewFeature`].
///
/// Fields outside the rule table (including any client-supplied `id` or
/// timestamps) are ignored.
pub fn validate_new_feature(payload: &Value) -> Result<NewFeature> {
    let object = payload
        .as_object()
        .ok_or_else(|| Error::invalid_request("request body must be a JSON object"))?;

    validate(object, FEATURE_RULES)?;

    let text = |field: &str| -> Result<String> {
        object
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::internal(format!("validated field '{field}' is missing")))
    };

    let status = text("status")?
        .parse::<FeatureStatus>()
        .map_err(Error::internal)?;

    Ok(NewFeature {
        name: text("name")?,
        description: text("description")?,
        status,
    })
}
