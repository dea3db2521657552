//! Composite view models from independently-sourced sub-entities.
//!
//! A transaction detail screen shows up to four sections — transaction,
//! reservation, payment, invoice — each fetched separately and each
//! possibly absent. [`EntityComposer`] normalizes and validates every
//! present part independently, merges their reports under section
//! prefixes, and tags each present section with a validity flag so the
//! renderer can show badges without blocking on a fully-valid whole.

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

use crate::context::ValidationContext;
use crate::error::ErrorReport;
use crate::normalize::{normalize, CanonicalEntity, NormalizationSpec};
use crate::path::FieldPath;
use crate::schema::{SchemaLike, ValueValidator};

/// One normalize-then-validate pipeline for an entity kind.
///
/// Normalization always succeeds; validation produces the advisory
/// [`ErrorReport`]. Required fields that had to be synthesized are still
/// reported as missing — the fallback is a rendering convenience, not
/// evidence the data was present.
#[derive(Clone)]
pub struct EntityProfile {
    spec: NormalizationSpec,
    schema: Arc<dyn ValueValidator>,
}

impl EntityProfile {
    /// Creates a profile from a normalization spec and a schema.
    pub fn new<S>(spec: NormalizationSpec, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        Self {
            spec,
            schema: Arc::new(schema),
        }
    }

    /// The normalization spec this profile applies.
    pub fn spec(&self) -> &NormalizationSpec {
        &self.spec
    }

    /// Normalizes the raw value, validates the canonical result, and
    /// returns both. Never panics; the entity is always renderable.
    pub fn run(&self, raw: &Value, ctx: &ValidationContext) -> (CanonicalEntity, ErrorReport) {
        let entity = normalize(raw, &self.spec);
        let mut report = ErrorReport::from_validation(self.schema.validate_value(
            entity.as_value(),
            &FieldPath::root(),
            ctx,
        ));

        for field in self.spec.fields() {
            if field.required && entity.is_synthesized(field.name()) {
                report.insert(
                    field.name(),
                    format!("required field '{}' was missing from the source data", field.name()),
                );
            }
        }

        (entity, report)
    }
}

/// The raw, possibly-absent parts of a transaction view.
///
/// Absence of an optional part is not an error; only
/// missing-and-required is.
#[derive(Debug, Clone, Default)]
pub struct ComposerParts {
    pub transaction: Value,
    pub reservation: Option<Value>,
    pub payment: Option<Value>,
    pub invoice: Option<Value>,
}

/// The composed view model handed to the renderer.
///
/// `section_validity` has an entry per *present* part only; an absent
/// optional part contributes neither errors nor a validity flag.
#[derive(Debug, Clone)]
pub struct CompositeViewModel {
    pub transaction: CanonicalEntity,
    pub reservation: Option<CanonicalEntity>,
    pub payment: Option<CanonicalEntity>,
    pub invoice: Option<CanonicalEntity>,
    pub report: ErrorReport,
    pub section_validity: IndexMap<String, bool>,
}

/// Assembles composite view models from per-part profiles.
pub struct EntityComposer {
    transaction: EntityProfile,
    reservation: EntityProfile,
    payment: EntityProfile,
    invoice: EntityProfile,
}

impl EntityComposer {
    /// Creates a composer from the four part profiles.
    pub fn new(
        transaction: EntityProfile,
        reservation: EntityProfile,
        payment: EntityProfile,
        invoice: EntityProfile,
    ) -> Self {
        Self {
            transaction,
            reservation,
            payment,
            invoice,
        }
    }

    /// Composes a view model from the raw parts.
    ///
    /// Each present part is normalized and validated independently;
    /// composition adds no field validation of its own, only the
    /// composer-level invariant that a transaction carries at least one
    /// of payment or reservation.
    pub fn compose(&self, parts: &ComposerParts, ctx: &ValidationContext) -> CompositeViewModel {
        let mut report = ErrorReport::empty();
        let mut section_validity = IndexMap::new();

        let (transaction, tx_report) = self.transaction.run(&parts.transaction, ctx);
        section_validity.insert("transaction".to_string(), tx_report.is_valid());
        report.merge(tx_report.prefixed("transaction"));

        let reservation = self.run_optional(
            &self.reservation,
            parts.reservation.as_ref(),
            "reservation",
            ctx,
            &mut report,
            &mut section_validity,
        );
        let payment = self.run_optional(
            &self.payment,
            parts.payment.as_ref(),
            "payment",
            ctx,
            &mut report,
            &mut section_validity,
        );
        let invoice = self.run_optional(
            &self.invoice,
            parts.invoice.as_ref(),
            "invoice",
            ctx,
            &mut report,
            &mut section_validity,
        );

        if payment.is_none() && reservation.is_none() {
            report.insert(
                "transaction",
                "a transaction requires at least one of payment or reservation",
            );
        }

        CompositeViewModel {
            transaction,
            reservation,
            payment,
            invoice,
            report,
            section_validity,
        }
    }

    fn run_optional(
        &self,
        profile: &EntityProfile,
        raw: Option<&Value>,
        section: &str,
        ctx: &ValidationContext,
        report: &mut ErrorReport,
        section_validity: &mut IndexMap<String, bool>,
    ) -> Option<CanonicalEntity> {
        let raw = raw?;
        let (entity, part_report) = profile.run(raw, ctx);
        section_validity.insert(section.to_string(), part_report.is_valid());
        report.merge(part_report.prefixed(section));
        Some(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Coerce, FieldSpec};
    use crate::schema::Schema;
    use serde_json::json;

    fn simple_profile(field: &str) -> EntityProfile {
        EntityProfile::new(
            NormalizationSpec::new().field(
                FieldSpec::new(field)
                    .coerce(Coerce::Text)
                    .default(json!(""))
                    .required(),
            ),
            Schema::object().field(field, Schema::string().min_len(1)),
        )
    }

    #[test]
    fn test_profile_run_valid() {
        let profile = simple_profile("concepto");
        let (entity, report) = profile.run(&json!({"concepto": "Reserva Sala A"}), &ValidationContext::default());
        assert_eq!(entity.get_str("concepto"), Some("Reserva Sala A"));
        assert!(report.is_valid());
    }

    #[test]
    fn test_profile_reports_synthesized_required_field() {
        let profile = simple_profile("concepto");
        let (entity, report) = profile.run(&json!({}), &ValidationContext::default());
        // Rendering still has a value, but the report flags the absence.
        assert_eq!(entity.get_str("concepto"), Some(""));
        assert!(!report.is_valid());
        assert!(!report.messages_at("concepto").is_empty());
    }

    #[test]
    fn test_compose_with_all_parts() {
        let composer = EntityComposer::new(
            simple_profile("concepto"),
            simple_profile("espacio"),
            simple_profile("metodo"),
            simple_profile("folio"),
        );

        let parts = ComposerParts {
            transaction: json!({"concepto": "Pago"}),
            reservation: Some(json!({"espacio": "Sala A"})),
            payment: Some(json!({"metodo": "tarjeta"})),
            invoice: Some(json!({"folio": "F-001"})),
        };

        let vm = composer.compose(&parts, &ValidationContext::default());
        assert!(vm.report.is_valid());
        assert_eq!(vm.section_validity.get("transaction"), Some(&true));
        assert_eq!(vm.section_validity.get("reservation"), Some(&true));
        assert_eq!(vm.section_validity.get("payment"), Some(&true));
        assert_eq!(vm.section_validity.get("invoice"), Some(&true));
    }

    #[test]
    fn test_absent_part_has_no_validity_entry() {
        let composer = EntityComposer::new(
            simple_profile("concepto"),
            simple_profile("espacio"),
            simple_profile("metodo"),
            simple_profile("folio"),
        );

        let parts = ComposerParts {
            transaction: json!({"concepto": "Pago"}),
            reservation: Some(json!({"espacio": "Sala A"})),
            payment: None,
            invoice: Some(json!({})),
        };

        let vm = composer.compose(&parts, &ValidationContext::default());
        assert!(vm.payment.is_none());
        assert!(vm.section_validity.get("payment").is_none());
        assert_eq!(vm.section_validity.get("reservation"), Some(&true));
        assert_eq!(vm.section_validity.get("invoice"), Some(&false));
        // Invoice errors are section-prefixed in the merged report.
        assert!(!vm.report.messages_at("invoice.folio").is_empty());
    }

    #[test]
    fn test_composer_invariant_payment_or_reservation() {
        let composer = EntityComposer::new(
            simple_profile("concepto"),
            simple_profile("espacio"),
            simple_profile("metodo"),
            simple_profile("folio"),
        );

        let parts = ComposerParts {
            transaction: json!({"concepto": "Pago"}),
            reservation: None,
            payment: None,
            invoice: None,
        };

        let vm = composer.compose(&parts, &ValidationContext::default());
        assert!(!vm.report.is_valid());
        assert!(vm.report.messages_at("transaction")[0].contains("payment or reservation"));
        // The transaction section itself validated cleanly; the composer
        // invariant is not a section failure.
        assert_eq!(vm.section_validity.get("transaction"), Some(&true));
    }
}
