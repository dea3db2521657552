//! # Canonform
//!
//! A schema validation and canonicalization engine that accumulates ALL
//! validation errors and always produces a renderable canonical entity,
//! rather than short-circuiting on the first failure or throwing on
//! malformed data.
//!
//! ## Overview
//!
//! Marketplace payloads arrive from a drifting REST backend: the same
//! logical field under several names, prices as bare numbers or structured
//! objects, amounts as numbers or formatted strings. Canonform splits the
//! response into two independent verdicts:
//!
//! - **Validation** is advisory and complete: every failing rule across
//!   the whole value is collected into one [`ErrorReport`], via
//!   stillwater's applicative `Validation`. Screens render badges from
//!   the report; they are never blocked by it.
//! - **Normalization** is total: [`normalize`] resolves aliases, coerces
//!   shapes and types, and injects documented defaults, so the renderer
//!   always receives a complete [`CanonicalEntity`]. Synthesized fields
//!   are marked so the UI can flag them.
//!
//! The sole blocking path is an [`ActionGate`]: state-changing actions
//! (withdrawals) evaluate explicit invariants and refuse with a
//! user-facing [`GateRefusal`] when they fail.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: paths to values in nested structures (e.g., `membresias[2].precio`)
//! - [`Schema`]: entry point for building validation schemas
//! - [`ErrorReport`]: path-keyed advisory error aggregate for screens
//! - [`NormalizationSpec`] / [`CanonicalEntity`]: declarative normalization
//! - [`EntityProfile`] / [`EntityComposer`]: per-entity pipelines and composite view models
//! - [`ProfileRegistry`]: pipelines resolved by entity name
//!
//! ## Example
//!
//! ```rust
//! use canonform::{ProfileRegistry, ValidationContext};
//! use serde_json::json;
//!
//! let registry = ProfileRegistry::builtin();
//!
//! // A drifted payload: aliased name, price as a bare number.
//! let raw = json!({"name": "Plan Pro", "precio": 49.9, "beneficios": ["Sala A"]});
//! let (entity, report) = registry
//!     .run("membership", &raw, &ValidationContext::default())
//!     .unwrap();
//!
//! assert!(report.is_valid());
//! assert_eq!(
//!     entity.get("precio"),
//!     Some(&json!({"valor": "$49.90", "periodicidad": "mensual"}))
//! );
//! ```

pub mod batch;
pub mod compose;
pub mod context;
pub mod entities;
pub mod error;
pub mod gate;
pub mod normalize;
pub mod path;
pub mod registry;
pub mod schema;

pub use batch::validate_batch;
pub use compose::{ComposerParts, CompositeViewModel, EntityComposer, EntityProfile};
pub use context::ValidationContext;
pub use error::{ErrorReport, SchemaError, SchemaErrors};
pub use gate::{ActionGate, GateCheck, GateRefusal};
pub use normalize::{
    normalize, parse_number, AliasSource, CanonicalEntity, Coerce, FieldSpec, NormalizationSpec,
};
pub use path::{FieldPath, PathSegment};
pub use registry::{ProfileRegistry, RegistryError};
pub use schema::{
    ArraySchema, BooleanSchema, ConditionalSchema, NumberSchema, ObjectSchema, Schema, SchemaLike,
    StringSchema, ValueValidator,
};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
