//! Object schema validation.
//!
//! [`ObjectSchema`] validates JSON objects with typed fields, optional
//! fields, default values, conditional requirements, and object-level
//! invariants (cross-field predicates). Field errors and invariant errors
//! are accumulated together: an object can report both "field too small"
//! and "total mismatch" in one pass.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::{value_type_name, SchemaLike};

/// Definition of a field within an object schema.
struct FieldDef {
    schema: Box<dyn SchemaLike<Output = Value>>,
    required: bool,
    default: Option<Value>,
}

/// How to handle properties not declared in the schema.
enum AdditionalProperties {
    /// Pass unknown properties through to the output (default).
    Allow,
    /// Report unknown properties as errors.
    Deny,
}

/// An object-level invariant over the whole value.
///
/// Invariants run after all field rules, always run to completion, and see
/// the raw input map plus the external context.
type InvariantFn =
    Box<dyn Fn(&Map<String, Value>, &FieldPath, &ValidationContext) -> Validation<(), SchemaErrors> + Send + Sync>;

/// A conditional requirement: when the trigger field satisfies the
/// predicate, the target field must be present.
struct RequireIf {
    trigger: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
    target: String,
}

/// A schema for validating JSON objects.
///
/// # Example
///
/// ```rust
/// use canonform::{FieldPath, Schema};
/// use serde_json::json;
///
/// let reserva = Schema::object()
///     .field("espacio", Schema::string().min_len(1))
///     .field("horaInicio", Schema::string())
///     .field("horaFin", Schema::string())
///     .invariant(|obj, path, _ctx| {
///         let inicio = obj.get("horaInicio").and_then(|v| v.as_str()).unwrap_or("");
///         let fin = obj.get("horaFin").and_then(|v| v.as_str()).unwrap_or("");
///         if fin <= inicio {
///             stillwater::Validation::Failure(canonform::SchemaErrors::single(
///                 canonform::SchemaError::new(
///                     path.push_field("horaFin"),
///                     "end time must be after start time",
///                 )
///                 .with_code("time_order"),
///             ))
///         } else {
///             stillwater::Validation::Success(())
///         }
///     });
///
/// let result = reserva.validate(
///     &json!({"espacio": "Sala A", "horaInicio": "09:00", "horaFin": "11:00"}),
///     &FieldPath::root(),
/// );
/// assert!(result.is_success());
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    invariants: Vec<InvariantFn>,
    conditional_requirements: Vec<RequireIf>,
    additional_properties: AdditionalProperties,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            invariants: Vec::new(),
            conditional_requirements: Vec::new(),
            additional_properties: AdditionalProperties::Allow,
            type_error_message: None,
        }
    }

    /// Adds a required field.
    ///
    /// A missing required field produces a single `required` error at the
    /// field's path; there is nothing to recurse into.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Box::new(SchemaWrapper(schema)),
                required: true,
                default: None,
            },
        );
        self
    }

    /// Adds an optional field; absence is not an error.
    pub fn optional<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Box::new(SchemaWrapper(schema)),
                required: false,
                default: None,
            },
        );
        self
    }

    /// Adds an optional field with a default injected when absent.
    pub fn default<S>(mut self, name: impl Into<String>, schema: S, default: Value) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Box::new(SchemaWrapper(schema)),
                required: false,
                default: Some(default),
            },
        );
        self
    }

    /// Adds an object-level invariant.
    ///
    /// Invariants run only after all field rules for the object have been
    /// evaluated, and every invariant runs even when field rules or other
    /// invariants have already failed, so all violations surface together.
    pub fn invariant<F>(mut self, check: F) -> Self
    where
        F: Fn(&Map<String, Value>, &FieldPath, &ValidationContext) -> Validation<(), SchemaErrors>
            + Send
            + Sync
            + 'static,
    {
        self.invariants.push(Box::new(check));
        self
    }

    /// Requires `target` to be present whenever `trigger`'s value
    /// satisfies the predicate (e.g., card payments need a card number).
    pub fn require_if<F>(mut self, trigger: impl Into<String>, predicate: F, target: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.conditional_requirements.push(RequireIf {
            trigger: trigger.into(),
            predicate: Box::new(predicate),
            target: target.into(),
        });
        self
    }

    /// Configures whether unknown properties are allowed (default) or
    /// reported as errors.
    pub fn additional_properties(mut self, allow: bool) -> Self {
        self.additional_properties = if allow {
            AdditionalProperties::Allow
        } else {
            AdditionalProperties::Deny
        };
        self
    }

    /// Sets a custom error message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    ///
    /// All field errors, conditional-requirement errors, and invariant
    /// errors are accumulated into one failure; validation never stops at
    /// the first problem.
    pub fn validate(
        &self,
        value: &Value,
        path: &FieldPath,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        self.validate_with_ctx(value, path, &ValidationContext::default())
    }

    fn validate_with_ctx(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected object".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value_type_name(value))
                        .with_expected("object"),
                ));
            }
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, field_def) in &self.fields {
            let field_path = path.push_field(name);

            match obj.get(name) {
                Some(field_value) => {
                    match field_def
                        .schema
                        .validate_to_value_with_context(field_value, &field_path, ctx)
                    {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => {
                            errors.extend(e.into_iter());
                        }
                    }
                }
                None if field_def.required => {
                    errors.push(
                        SchemaError::new(field_path, format!("required field '{}' is missing", name))
                            .with_code("required")
                            .with_expected("value"),
                    );
                }
                None => {
                    if let Some(default) = &field_def.default {
                        validated.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        for req in &self.conditional_requirements {
            let trigger_value = obj.get(&req.trigger).unwrap_or(&Value::Null);
            if (req.predicate)(trigger_value) && !obj.contains_key(&req.target) {
                errors.push(
                    SchemaError::new(
                        path.push_field(&req.target),
                        format!(
                            "field '{}' is required when '{}' has this value",
                            req.target, req.trigger
                        ),
                    )
                    .with_code("conditional_required"),
                );
            }
        }

        for (key, field_value) in obj {
            if !self.fields.contains_key(key) {
                match &self.additional_properties {
                    AdditionalProperties::Allow => {
                        validated.insert(key.clone(), field_value.clone());
                    }
                    AdditionalProperties::Deny => {
                        errors.push(
                            SchemaError::new(path.push_field(key), format!("unknown field '{}'", key))
                                .with_code("additional_property"),
                        );
                    }
                }
            }
        }

        // Invariants see the raw input and run unconditionally, after all
        // field-level rules.
        for invariant in &self.invariants {
            if let Validation::Failure(e) = invariant(obj, path, ctx) {
                errors.extend(e.into_iter());
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Self::Output, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate_with_ctx(value, path, ctx).map(Value::Object)
    }
}

/// Adapts any `SchemaLike` to produce `Value` output, so field schemas of
/// different output types can be stored uniformly.
struct SchemaWrapper<S>(S);

impl<S: SchemaLike> SchemaLike for SchemaWrapper<S> {
    type Output = Value;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value_with_context(value, path, ctx)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value_with_context(value, path, ctx)
    }
}
