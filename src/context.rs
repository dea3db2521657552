//! External facts supplied to cross-field predicates and gates.
//!
//! Some invariants need facts the payload itself does not carry, such as
//! the funds available to the current session. [`ValidationContext`] is a
//! read-only bag of named facts passed by reference through the validation
//! call chain. Leaf schemas ignore it; object-level invariants and action
//! gates may read it.

use indexmap::IndexMap;
use serde_json::Value;

/// Read-only named facts from the session/state container.
///
/// # Example
///
/// ```rust
/// use canonform::ValidationContext;
/// use serde_json::json;
///
/// let ctx = ValidationContext::new()
///     .with_fact("fondos_disponibles", json!(1250.0));
///
/// assert_eq!(ctx.number_fact("fondos_disponibles"), Some(1250.0));
/// assert!(ctx.fact("usuario").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    facts: IndexMap<String, Value>,
}

impl ValidationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a context with the named fact added.
    pub fn with_fact(mut self, name: impl Into<String>, value: Value) -> Self {
        self.facts.insert(name.into(), value);
        self
    }

    /// Looks up a fact by name.
    pub fn fact(&self, name: &str) -> Option<&Value> {
        self.facts.get(name)
    }

    /// Looks up a fact and coerces it to f64.
    pub fn number_fact(&self, name: &str) -> Option<f64> {
        self.facts.get(name).and_then(Value::as_f64)
    }

    /// Returns true if no facts are present.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_context() {
        let ctx = ValidationContext::new();
        assert!(ctx.is_empty());
        assert!(ctx.fact("anything").is_none());
    }

    #[test]
    fn test_fact_lookup() {
        let ctx = ValidationContext::new()
            .with_fact("fondos_disponibles", json!(50))
            .with_fact("usuario_id", json!("u-77"));

        assert_eq!(ctx.number_fact("fondos_disponibles"), Some(50.0));
        assert_eq!(ctx.fact("usuario_id"), Some(&json!("u-77")));
        assert!(ctx.number_fact("usuario_id").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let ctx = ValidationContext::new()
            .with_fact("saldo", json!(10))
            .with_fact("saldo", json!(20));
        assert_eq!(ctx.number_fact("saldo"), Some(20.0));
    }
}
