//! Conditional schema resolution.
//!
//! Some fields arrive in more than one shape: a membership price can be a
//! bare number (`49.99`) or a structured object (`{"valor": 49.99,
//! "periodicidad": "mensual"}`). [`ConditionalSchema`] keeps that shape
//! dispatch in one place: a total selector inspects the raw value and
//! returns the concrete schema to validate against.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::SchemaErrors;
use crate::path::FieldPath;

use super::traits::{SchemaLike, ValueValidator};

/// Selector resolving the concrete schema from the runtime value shape.
type SelectorFn = Arc<dyn Fn(&Value) -> Arc<dyn ValueValidator> + Send + Sync>;

/// A schema chosen at validation time by inspecting the raw value.
///
/// The selector must be total: it returns a usable schema for any input,
/// including malformed values, so validation always produces errors
/// instead of panicking.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use canonform::{ConditionalSchema, FieldPath, Schema, ValueValidator};
/// use serde_json::json;
///
/// let bare: Arc<dyn ValueValidator> = Arc::new(Schema::number().positive());
/// let structured: Arc<dyn ValueValidator> = Arc::new(
///     Schema::object()
///         .field("valor", Schema::number().positive())
///         .default("periodicidad", Schema::string(), json!("mensual")),
/// );
///
/// let precio = ConditionalSchema::new(move |value| {
///     if value.is_object() {
///         Arc::clone(&structured)
///     } else {
///         Arc::clone(&bare)
///     }
/// });
///
/// assert!(precio.validate(&json!(49.99), &FieldPath::root()).is_success());
/// assert!(precio
///     .validate(&json!({"valor": 49.99, "periodicidad": "mensual"}), &FieldPath::root())
///     .is_success());
/// assert!(precio.validate(&json!("gratis"), &FieldPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct ConditionalSchema {
    selector: SelectorFn,
}

impl ConditionalSchema {
    /// Creates a conditional schema from a total selector.
    pub fn new<F>(selector: F) -> Self
    where
        F: Fn(&Value) -> Arc<dyn ValueValidator> + Send + Sync + 'static,
    {
        Self {
            selector: Arc::new(selector),
        }
    }

    /// Resolves the concrete schema for the value and validates against it.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.validate_with_ctx(value, path, &ValidationContext::default())
    }

    fn validate_with_ctx(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        (self.selector)(value).validate_value(value, path, ctx)
    }
}

impl SchemaLike for ConditionalSchema {
    type Output = Value;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx)
    }
}
