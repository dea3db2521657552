//! String schema validation.
//!
//! [`StringSchema`] validates string values with length bounds, regex
//! patterns, and enum membership. All constraint violations are
//! accumulated rather than short-circuiting on the first failure.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::{value_type_name, SchemaLike};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        pattern_str: String,
        message: Option<String>,
    },
    OneOf {
        allowed: Vec<String>,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// # Example
///
/// ```rust
/// use canonform::{FieldPath, Schema};
/// use serde_json::json;
///
/// let estado = Schema::string().one_of(["pendiente", "pagado", "rechazado"]);
///
/// assert!(estado.validate(&json!("pagado"), &FieldPath::root()).is_success());
/// assert!(estado.validate(&json!("cancelled"), &FieldPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a minimum length constraint (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if the pattern is invalid; a bad pattern is a
    /// programmer error surfaced at schema-build time, not at validation
    /// time.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
            message: None,
        });
        Ok(self)
    }

    /// Adds an enum membership constraint.
    ///
    /// The string must be one of the allowed values.
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(StringConstraint::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, this sets the type error message used when
    /// the value is not a string.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
                StringConstraint::OneOf { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema, accumulating every failing
    /// constraint's error.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<String, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected string".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value_type_name(value))
                        .with_expected("string"),
                ));
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        if errors.is_empty() {
            Validation::Success(s.to_string())
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<String, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::String)
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &FieldPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("min_length")
                        .with_expected(format!("at least {} characters", min))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("max_length")
                        .with_expected(format!("at most {} characters", max))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::Pattern {
            regex,
            pattern_str,
            message,
        } => {
            if !regex.is_match(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must match pattern '{}'", pattern_str));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("pattern")
                        .with_expected(format!("string matching '{}'", pattern_str))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        StringConstraint::OneOf { allowed, message } => {
            if !allowed.iter().any(|a| a == value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be one of: {}", allowed.join(", ")));
                Some(
                    SchemaError::new(path.clone(), msg)
                        .with_code("one_of")
                        .with_expected(format!("one of: {}", allowed.join(", ")))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_string() {
        let schema = StringSchema::new();
        let result = schema.validate(&json!("hola"), &FieldPath::root());
        assert!(result.is_success());
        assert_eq!(result.into_result().unwrap(), "hola");
    }

    #[test]
    fn test_rejects_non_string() {
        let schema = StringSchema::new();

        let result = schema.validate(&json!(42), &FieldPath::root());
        assert!(result.is_failure());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().code, "invalid_type");
        assert_eq!(errors.first().got, Some("number".to_string()));

        assert!(schema.validate(&json!(null), &FieldPath::root()).is_failure());
        assert!(schema.validate(&json!([1]), &FieldPath::root()).is_failure());
    }

    #[test]
    fn test_min_len_constraint() {
        let schema = StringSchema::new().min_len(5);

        assert!(schema.validate(&json!("hello"), &FieldPath::root()).is_success());

        let result = schema.validate(&json!("hi"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().code, "min_length");
    }

    #[test]
    fn test_max_len_constraint() {
        let schema = StringSchema::new().max_len(10);

        assert!(schema.validate(&json!(""), &FieldPath::root()).is_success());

        let result = schema.validate(&json!("this is way too long"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().code, "max_length");
    }

    #[test]
    fn test_pattern_constraint() {
        let schema = StringSchema::new().pattern(r"^\$\d+\.\d{2}$").unwrap();

        assert!(schema.validate(&json!("$49.90"), &FieldPath::root()).is_success());

        let result = schema.validate(&json!("49.90"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().code, "pattern");
    }

    #[test]
    fn test_one_of_constraint() {
        let schema = StringSchema::new().one_of(["mensual", "anual"]);

        assert!(schema.validate(&json!("mensual"), &FieldPath::root()).is_success());

        let result = schema.validate(&json!("semanal"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().code, "one_of");
        assert!(errors.first().message.contains("mensual"));
    }

    #[test]
    fn test_error_accumulation() {
        let schema = StringSchema::new().min_len(10).pattern(r"^\d+$").unwrap();

        let result = schema.validate(&json!("abc"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code("min_length").len(), 1);
        assert_eq!(errors.with_code("pattern").len(), 1);
    }

    #[test]
    fn test_custom_error_message() {
        let schema = StringSchema::new().min_len(5).error("nombre demasiado corto");

        let result = schema.validate(&json!("ab"), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().message, "nombre demasiado corto");
    }

    #[test]
    fn test_custom_type_error_message() {
        let schema = StringSchema::new().error("must be a string");

        let result = schema.validate(&json!(42), &FieldPath::root());
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().message, "must be a string");
    }

    #[test]
    fn test_path_tracking() {
        let schema = StringSchema::new().min_len(5);
        let path = FieldPath::root().push_field("usuario").push_field("nombre");

        let result = schema.validate(&json!("ab"), &path);
        let errors = unwrap_failure(result);
        assert_eq!(errors.first().path.to_string(), "usuario.nombre");
    }

    #[test]
    fn test_unicode_length() {
        let schema = StringSchema::new().min_len(3).max_len(5);

        assert!(schema.validate(&json!("日本語"), &FieldPath::root()).is_success());
        assert!(schema.validate(&json!("🎉🎊"), &FieldPath::root()).is_failure());
    }

    #[test]
    fn test_invalid_regex_pattern() {
        assert!(StringSchema::new().pattern(r"[invalid").is_err());
    }
}
