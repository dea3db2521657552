//! Numeric schema validation.
//!
//! [`NumberSchema`] validates numeric values (integers and floats alike,
//! compared as f64 — monetary amounts arrive both ways from the backend)
//! with bound constraints. All violations are accumulated.

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::{value_type_name, SchemaLike};

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Min { min: f64, message: Option<String> },
    Max { max: f64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
}

/// A schema for validating numeric values.
///
/// # Example
///
/// ```rust
/// use canonform::{FieldPath, Schema};
/// use serde_json::json;
///
/// let monto = Schema::number().min(100.0).max(50_000.0);
///
/// assert!(monto.validate(&json!(150), &FieldPath::root()).is_success());
/// assert!(monto.validate(&json!(60), &FieldPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a minimum value constraint (inclusive).
    pub fn min(mut self, min: f64) -> Self {
        self.constraints
            .push(NumberConstraint::Min { min, message: None });
        self
    }

    /// Adds a maximum value constraint (inclusive).
    pub fn max(mut self, max: f64) -> Self {
        self.constraints
            .push(NumberConstraint::Max { max, message: None });
        self
    }

    /// Requires the value to be strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires the value to be zero or greater.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, this sets the type error message used when
    /// the value is not a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                NumberConstraint::Min { message: m, .. } => *m = Some(message.into()),
                NumberConstraint::Max { message: m, .. } => *m = Some(message.into()),
                NumberConstraint::Positive { message: m } => *m = Some(message.into()),
                NumberConstraint::NonNegative { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema, accumulating every failing
    /// constraint's error.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<f64, SchemaErrors> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected number".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value_type_name(value))
                        .with_expected("number"),
                ));
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, n, path))
            .collect();

        if errors.is_empty() {
            Validation::Success(n)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<f64, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        // Keep the original JSON representation so integers stay integers.
        match self.validate(value, path) {
            Validation::Success(_) => Validation::Success(value.clone()),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(constraint: &NumberConstraint, value: f64, path: &FieldPath) -> Option<SchemaError> {
    match constraint {
        NumberConstraint::Min { min, message } => {
            if value < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at least {}, got {}", min, value));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("min_value")
                        .with_expected(format!(">= {}", min))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        NumberConstraint::Max { max, message } => {
            if value > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at most {}, got {}", max, value));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("max_value")
                        .with_expected(format!("<= {}", max))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        NumberConstraint::Positive { message } => {
            if value <= 0.0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be positive, got {}", value));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("positive")
                        .with_expected("> 0")
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        NumberConstraint::NonNegative { message } => {
            if value < 0.0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must not be negative, got {}", value));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("non_negative")
                        .with_expected(">= 0")
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
    }
}
