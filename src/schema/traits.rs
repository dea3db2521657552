//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] lets the different schema types (string, number, object,
//! array, conditional) compose for nested validation; [`ValueValidator`]
//! is the type-erased form used wherever heterogeneous schemas mix.

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::SchemaErrors;
use crate::path::FieldPath;

/// A schema type that can validate JSON values.
///
/// The `Send + Sync` bounds let schemas be shared across threads and used
/// as trait objects; a schema is immutable once built and may serve many
/// concurrent validation calls.
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value with access to external facts.
    ///
    /// Never panics for any well-formed schema/value pair: failures are
    /// returned as accumulated errors, not raised.
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Self::Output, SchemaErrors>;

    /// Validates a value and returns the result as a `serde_json::Value`.
    ///
    /// Allows schema types with different output types to be used
    /// uniformly where fields are stored as `Value`.
    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors>;

    /// Validates a value with an empty context.
    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate_with_context(value, path, &ValidationContext::default())
    }

    /// Validates a value to `Value` output with an empty context.
    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.validate_to_value_with_context(value, path, &ValidationContext::default())
    }
}

/// A type-erased schema that validates to JSON values.
///
/// Any `SchemaLike` automatically implements this, so conditional schemas
/// and entity profiles can hold schemas of different output types behind
/// `Arc<dyn ValueValidator>`.
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_value(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate_to_value_with_context(value, path, ctx)
    }
}

/// Returns the JSON type name for a value, used in type-error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
