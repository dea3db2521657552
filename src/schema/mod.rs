//! Schema definitions for validation.
//!
//! Each schema type validates values and accumulates all validation
//! errors rather than short-circuiting on the first failure. Schemas are
//! immutable once built and safe to share across concurrent validation
//! calls from many screens.
//!
//! # Example
//!
//! ```rust
//! use canonform::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("nombre", Schema::string().min_len(1))
//!     .field("monto", Schema::number().non_negative());
//!
//! let result = schema.validate(&json!({"nombre": "Ana", "monto": 120.0}), &FieldPath::root());
//! assert!(result.is_success());
//! ```

mod array;
mod boolean;
mod conditional;
mod numeric;
mod object;
mod string;
mod traits;

use std::sync::Arc;

use serde_json::Value;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use conditional::ConditionalSchema;
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};

/// Entry point for creating validation schemas.
///
/// Factory methods for each schema type; constraints are added through
/// builder methods on the returned schema.
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new number schema (integers and floats, compared as f64).
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a new boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a new object schema.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a new array schema with the given element schema.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }

    /// Creates a conditional schema resolved at validation time by
    /// inspecting the raw value's shape.
    pub fn conditional<F>(selector: F) -> ConditionalSchema
    where
        F: Fn(&Value) -> Arc<dyn ValueValidator> + Send + Sync + 'static,
    {
        ConditionalSchema::new(selector)
    }
}
