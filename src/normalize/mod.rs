//! Normalization of raw backend payloads into canonical entities.
//!
//! [`normalize`] is a total function: whatever shape arrives from the REST
//! API, it produces a [`CanonicalEntity`] containing every field the
//! renderer expects, substituting documented defaults for anything missing
//! or unparseable and marking those fields as synthesized. It never
//! panics and never returns a partial shape — validation advises on
//! quality separately, rendering is never blocked.
//!
//! Per field, rules apply in priority order: alias resolution, shape
//! coercion, type coercion, default injection.

mod coerce;
mod spec;

use std::collections::BTreeSet;

use serde_json::{Map, Value};

pub use coerce::{coerce_currency, coerce_date, coerce_text, format_currency, now_rfc3339, parse_number};
pub use spec::{AliasSource, Coerce, FieldSpec, NormalizationSpec};

/// The canonical, fully-defaulted form of an entity.
///
/// Every field declared in the spec is present; fields whose value was
/// synthesized from a default (rather than sourced from the payload) are
/// tracked so the UI can render ⚠️ badges. The document renderer's
/// contract — no referenced field is ever missing — follows directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEntity {
    value: Value,
    synthesized: BTreeSet<String>,
}

impl CanonicalEntity {
    /// Looks up a canonical field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.value.get(name)
    }

    /// Looks up a canonical field as a string slice.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.value.get(name).and_then(Value::as_str)
    }

    /// True when the field's value came from a default rather than the
    /// source payload.
    pub fn is_synthesized(&self, name: &str) -> bool {
        self.synthesized.contains(name)
    }

    /// The names of all synthesized fields.
    pub fn synthesized_fields(&self) -> impl Iterator<Item = &str> {
        self.synthesized.iter().map(String::as_str)
    }

    /// Borrows the canonical field map as a JSON object, without cloning.
    ///
    /// This is what profiles validate against; list screens run it once
    /// per item.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Clones the canonical field map as a JSON object.
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }
}

/// Converts a raw, heterogeneously-shaped value into a canonical entity.
///
/// Total and idempotent over the canonical field map:
/// `normalize(&normalize(x, s).to_value(), s)` yields the same fields as
/// `normalize(x, s)`, because the canonical key is always the first alias
/// and every coercion is a fixed point on its own output.
///
/// # Example
///
/// ```rust
/// use canonform::{normalize, Coerce, FieldSpec, NormalizationSpec};
/// use serde_json::json;
///
/// let spec = NormalizationSpec::new()
///     .field(
///         FieldSpec::new("nombre")
///             .alias("name")
///             .join(["firstName", "lastName"])
///             .coerce(Coerce::Text)
///             .default(json!("Usuario desconocido")),
///     )
///     .field(FieldSpec::new("monto").coerce(Coerce::Currency).default(json!("$0.00")));
///
/// let entity = normalize(&json!({"firstName": "A", "lastName": "M", "monto": "49.9"}), &spec);
/// assert_eq!(entity.get_str("nombre"), Some("A M"));
/// assert_eq!(entity.get_str("monto"), Some("$49.90"));
/// assert!(!entity.is_synthesized("monto"));
/// ```
pub fn normalize(raw: &Value, spec: &NormalizationSpec) -> CanonicalEntity {
    let mut fields = Map::new();
    let mut synthesized = BTreeSet::new();

    for field in spec.fields() {
        match resolve_and_coerce(raw, field) {
            Some(value) => {
                fields.insert(field.name.clone(), value);
            }
            None => {
                let default = field.default_value();
                tracing::debug!(
                    field = field.name.as_str(),
                    default = %default,
                    "no usable source for field, injecting default"
                );
                fields.insert(field.name.clone(), default);
                synthesized.insert(field.name.clone());
            }
        }
    }

    CanonicalEntity {
        value: Value::Object(fields),
        synthesized,
    }
}

/// Tries each alias source in priority order and applies the field's
/// coercion to the first non-empty candidate that coerces cleanly.
fn resolve_and_coerce(raw: &Value, field: &FieldSpec) -> Option<Value> {
    for source in &field.sources {
        let Some(candidate) = resolve_source(raw, source) else {
            continue;
        };
        if let Some(coerced) = apply_coercion(&candidate, field.coerce) {
            return Some(coerced);
        }
    }
    None
}

/// Extracts a candidate value from the raw payload, skipping empties.
fn resolve_source(raw: &Value, source: &AliasSource) -> Option<Value> {
    match source {
        AliasSource::Key(key) => raw.get(key).filter(|v| !is_empty(v)).cloned(),
        AliasSource::Path(path) => {
            let mut current = raw;
            for key in path {
                current = current.get(key)?;
            }
            if is_empty(current) {
                None
            } else {
                Some(current.clone())
            }
        }
        AliasSource::Join { keys, separator } => {
            let parts: Vec<&str> = keys
                .iter()
                .filter_map(|k| raw.get(k).and_then(Value::as_str))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(Value::String(parts.join(separator)))
            }
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Applies a coercion mode; `None` means the candidate was unusable.
fn apply_coercion(candidate: &Value, coerce: Coerce) -> Option<Value> {
    match coerce {
        Coerce::Raw => Some(candidate.clone()),
        Coerce::Text => coerce_text(candidate).map(Value::String),
        Coerce::Number => parse_number(candidate).map(Value::from),
        Coerce::Currency => coerce_currency(candidate).map(Value::String),
        Coerce::Date => coerce_date(candidate).map(Value::String),
        Coerce::Price => coerce_price(candidate),
    }
}

/// Canonicalizes a price that may arrive as a bare scalar or as
/// `{valor, periodicidad}`; the canonical form is always the structured
/// object with a currency-string `valor`.
fn coerce_price(candidate: &Value) -> Option<Value> {
    let (valor, periodicidad) = match candidate {
        Value::Object(obj) => {
            let valor = coerce_currency(obj.get("valor")?)?;
            let periodicidad = obj
                .get("periodicidad")
                .and_then(Value::as_str)
                .unwrap_or("mensual")
                .to_string();
            (valor, periodicidad)
        }
        scalar => (coerce_currency(scalar)?, "mensual".to_string()),
    };

    let mut price = Map::new();
    price.insert("valor".to_string(), Value::String(valor));
    price.insert("periodicidad".to_string(), Value::String(periodicidad));
    Some(Value::Object(price))
}
