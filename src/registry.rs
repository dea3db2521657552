//! Named storage of entity profiles.
//!
//! Screens resolve their normalize-then-validate pipeline by entity name
//! ("membership", "withdrawal", ...) instead of wiring schemas directly.
//! The registry is thread-safe: many screens validate concurrently with
//! read access; registration is serialized behind the write lock.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compose::EntityProfile;
use crate::context::ValidationContext;
use crate::error::ErrorReport;
use crate::normalize::CanonicalEntity;

/// A thread-safe registry of named [`EntityProfile`]s.
///
/// # Example
///
/// ```rust
/// use canonform::{ProfileRegistry, ValidationContext};
/// use serde_json::json;
///
/// let registry = ProfileRegistry::builtin();
///
/// let (entity, report) = registry
///     .run("withdrawal", &json!({"monto": "250", "metodo": "transferencia"}), &ValidationContext::default())
///     .unwrap();
///
/// assert_eq!(entity.get_str("monto"), Some("$250.00"));
/// assert!(report.is_valid());
/// ```
pub struct ProfileRegistry {
    profiles: Arc<RwLock<HashMap<String, Arc<EntityProfile>>>>,
}

impl ProfileRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry preloaded with the built-in marketplace
    /// profiles: `transaction`, `reservation`, `payment`, `invoice`,
    /// `membership`, `notification`, `earnings`, `withdrawal`, `user`.
    pub fn builtin() -> Self {
        let builtins: [(&str, EntityProfile); 9] = [
            ("transaction", crate::entities::transaction_profile()),
            ("reservation", crate::entities::reservation_profile()),
            ("payment", crate::entities::payment_profile()),
            ("invoice", crate::entities::invoice_profile()),
            ("membership", crate::entities::membership_profile()),
            ("notification", crate::entities::notification_profile()),
            ("earnings", crate::entities::earnings_profile()),
            ("withdrawal", crate::entities::withdrawal_profile()),
            ("user", crate::entities::user_profile()),
        ];
        let profiles = builtins
            .into_iter()
            .map(|(name, profile)| (name.to_string(), Arc::new(profile)))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }

    /// Registers a profile under a name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        profile: EntityProfile,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut profiles = self.profiles.write();

        if profiles.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        profiles.insert(name, Arc::new(profile));
        Ok(())
    }

    /// Retrieves a profile by name.
    pub fn get(&self, name: &str) -> Option<Arc<EntityProfile>> {
        self.profiles.read().get(name).cloned()
    }

    /// Normalizes and validates a raw value with the named profile.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ProfileNotFound` if the name is unknown —
    /// a programmer error, not a data-quality issue.
    pub fn run(
        &self,
        name: &str,
        raw: &Value,
        ctx: &ValidationContext,
    ) -> Result<(CanonicalEntity, ErrorReport), RegistryError> {
        let profile = self
            .get(name)
            .ok_or_else(|| RegistryError::ProfileNotFound(name.to_string()))?;
        Ok(profile.run(raw, ctx))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProfileRegistry {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a profile with a name that already exists.
    #[error("profile '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to run a profile name that doesn't exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
    use crate::schema::Schema;
    use serde_json::json;

    fn noop_profile() -> EntityProfile {
        EntityProfile::new(
            NormalizationSpec::new()
                .field(FieldSpec::new("nombre").coerce(Coerce::Text).default(json!(""))),
            Schema::object(),
        )
    }

    #[test]
    fn test_register_and_get() {
        let registry = ProfileRegistry::new();
        registry.register("user", noop_profile()).unwrap();

        assert!(registry.get("user").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = ProfileRegistry::new();
        registry.register("user", noop_profile()).unwrap();

        let err = registry.register("user", noop_profile()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(_)));
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn test_run_unknown_profile() {
        let registry = ProfileRegistry::new();
        let err = registry
            .run("nope", &json!({}), &ValidationContext::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::ProfileNotFound(_)));
    }

    #[test]
    fn test_clone_shares_storage() {
        let registry = ProfileRegistry::new();
        let clone = registry.clone();
        registry.register("user", noop_profile()).unwrap();
        assert!(clone.get("user").is_some());
    }

    #[test]
    fn test_builtin_profiles_present() {
        let registry = ProfileRegistry::builtin();
        for name in [
            "transaction",
            "reservation",
            "payment",
            "invoice",
            "membership",
            "notification",
            "earnings",
            "withdrawal",
            "user",
        ] {
            assert!(registry.get(name).is_some(), "missing builtin '{}'", name);
        }
    }
}
