//! Declarative normalization configuration.
//!
//! The REST backend names the same logical field differently across
//! endpoints and versions. A [`NormalizationSpec`] lists, per canonical
//! field, the alias sources to try in priority order, the coercion to
//! apply, and the documented default used when nothing usable arrives.
//! Defaults live here as data instead of being buried in screen code, so
//! they are independently testable.

use serde_json::Value;

use super::coerce::now_rfc3339;

/// Where a field's value may come from in the raw payload.
#[derive(Debug, Clone)]
pub enum AliasSource {
    /// A top-level key (e.g., `name`).
    Key(String),
    /// A nested path of keys (e.g., `usuario.nombre`).
    Path(Vec<String>),
    /// Several keys joined with a separator, skipping empty parts
    /// (e.g., `firstName` + `lastName` → `"A M"`).
    Join { keys: Vec<String>, separator: String },
}

/// The coercion applied once a source candidate is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerce {
    /// Keep the value as-is.
    Raw,
    /// Force to a string; numbers are rendered, other shapes rejected.
    Text,
    /// Parse to a number; numeric strings (including `"$1,200.50"`) accepted.
    Number,
    /// Parse to a number and render as a currency string (`"$49.90"`).
    Currency,
    /// Parse RFC 3339 or `YYYY-MM-DD` and render canonical RFC 3339;
    /// unparseable dates fall back to now.
    Date,
    /// A price that may arrive as a bare scalar or `{valor, periodicidad}`;
    /// canonical form is always the structured object with a currency
    /// `valor`.
    Price,
}

/// How a field's default is produced when no source yields a usable value.
///
/// `Fixed` defaults are plain data; `NowTimestamp` is rendered at
/// injection time, so a spec built once (e.g., inside a long-lived
/// registry) still falls back to the time of the normalization call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DefaultValue {
    Fixed(Value),
    NowTimestamp,
}

/// Normalization rules for a single canonical field.
///
/// The canonical key itself is always the first source tried, which is
/// what makes normalization idempotent: re-normalizing canonical output
/// finds every field under its canonical name.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) sources: Vec<AliasSource>,
    pub(crate) coerce: Coerce,
    pub(crate) default: DefaultValue,
    pub(crate) required: bool,
}

impl FieldSpec {
    /// Creates a field spec for `name`, with the canonical key as the
    /// first alias source, `Raw` coercion, and `Null` default.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            sources: vec![AliasSource::Key(name.clone())],
            name,
            coerce: Coerce::Raw,
            default: DefaultValue::Fixed(Value::Null),
            required: false,
        }
    }

    /// Adds a fallback top-level key alias.
    pub fn alias(mut self, key: impl Into<String>) -> Self {
        self.sources.push(AliasSource::Key(key.into()));
        self
    }

    /// Adds a fallback nested-path alias.
    pub fn nested<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources
            .push(AliasSource::Path(path.into_iter().map(Into::into).collect()));
        self
    }

    /// Adds a fallback alias joining several keys with a space.
    pub fn join<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(AliasSource::Join {
            keys: keys.into_iter().map(Into::into).collect(),
            separator: " ".to_string(),
        });
        self
    }

    /// Sets the coercion mode.
    pub fn coerce(mut self, coerce: Coerce) -> Self {
        self.coerce = coerce;
        self
    }

    /// Sets the documented default injected when no source candidate
    /// produces a usable value.
    pub fn default(mut self, default: Value) -> Self {
        self.default = DefaultValue::Fixed(default);
        self
    }

    /// Uses the current timestamp as the default, computed when the
    /// default is injected rather than when the spec is built.
    ///
    /// Intended for `Coerce::Date` fields: an unparseable or missing date
    /// falls back to the time of the normalization call, in the same
    /// canonical RFC 3339 rendering the coercion produces.
    pub fn default_now(mut self) -> Self {
        self.default = DefaultValue::NowTimestamp;
        self
    }

    /// Marks the field as required.
    ///
    /// Normalization still injects the default (rendering must not block),
    /// but a synthesized required field is additionally reported as
    /// missing by the entity profile: the fallback is a rendering
    /// convenience, not evidence the data was present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The canonical field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materializes the default value for one injection.
    pub(crate) fn default_value(&self) -> Value {
        match &self.default {
            DefaultValue::Fixed(value) => value.clone(),
            DefaultValue::NowTimestamp => Value::String(now_rfc3339()),
        }
    }
}

/// Ordered collection of field specs for one entity kind.
#[derive(Debug, Clone, Default)]
pub struct NormalizationSpec {
    pub(crate) fields: Vec<FieldSpec>,
}

impl NormalizationSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field spec; output order follows insertion order.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Iterates over the declared fields.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }
}
