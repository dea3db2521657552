//! Array schema validation.
//!
//! [`ArraySchema`] validates arrays with an element schema and length
//! bounds. Bounds are checked first, then every element independently:
//! a failure at element `i` never adds or removes errors at any other
//! index, and each element's errors carry its numeric index in the path.

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::{value_type_name, SchemaLike};

/// A bound constraint applied to array values.
enum ArrayConstraint {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
}

/// A schema for validating array values.
///
/// # Example
///
/// ```rust
/// use canonform::{FieldPath, Schema};
/// use serde_json::json;
///
/// let beneficios = Schema::array(Schema::string().min_len(1)).non_empty();
///
/// let result = beneficios.validate(&json!(["wifi", "cafe"]), &FieldPath::root());
/// assert!(result.is_success());
///
/// let result = beneficios.validate(&json!([]), &FieldPath::root());
/// assert!(result.is_failure());
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given element schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a minimum length constraint.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires at least one element; equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, this sets the type error message used when
    /// the value is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                ArrayConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                ArrayConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema.
    ///
    /// Checks the type, then length bounds, then each element against the
    /// element schema. All errors from all steps accumulate; per-element
    /// failures are fully independent.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Vec<Value>, SchemaErrors> {
        self.validate_with_ctx(value, path, &ValidationContext::default())
    }

    fn validate_with_ctx(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Vec<Value>, SchemaErrors> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected array".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value_type_name(value))
                        .with_expected("array"),
                ));
            }
        };

        let mut errors = Vec::new();

        for constraint in &self.constraints {
            if let Some(error) = check_bound(constraint, arr.len(), path) {
                errors.push(error);
            }
        }

        let mut validated = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            let item_path = path.push_index(index);
            match self
                .item_schema
                .validate_to_value_with_context(item, &item_path, ctx)
            {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e.into_iter()),
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Vec<Value>, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx).map(Value::Array)
    }
}

/// Checks a length bound and returns an error if it fails.
fn check_bound(constraint: &ArrayConstraint, len: usize, path: &FieldPath) -> Option<SchemaError> {
    match constraint {
        ArrayConstraint::MinLength { min, message } => {
            if len < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must have at least {} items, got {}", min, len));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("min_items")
                        .with_expected(format!("at least {} items", min))
                        .with_got(format!("{} items", len)),
                )
            } else {
                None
            }
        }
        ArrayConstraint::MaxLength { max, message } => {
            if len > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must have at most {} items, got {}", max, len));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("max_items")
                        .with_expected(format!("at most {} items", max))
                        .with_got(format!("{} items", len)),
                )
            } else {
                None
            }
        }
    }
}
