//! Boolean schema validation.

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::{value_type_name, SchemaLike};

/// A schema for validating boolean values (e.g., a notification's `leida`
/// flag).
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a new boolean schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<bool, SchemaErrors> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected boolean".to_string());
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value_type_name(value))
                        .with_expected("boolean"),
                ))
            }
        }
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<bool, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Bool)
    }
}
