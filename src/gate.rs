//! Action-gating invariants.
//!
//! Almost all validation in this crate is advisory: a failed check renders
//! as a badge, never a block. The one exception is a state-changing action
//! (withdraw, subscribe, cancel): its invariants are evaluated explicitly
//! beforehand and, on failure, the action is refused with a user-facing
//! message.
//!
//! [`ActionGate::check`] takes the advisory [`ErrorReport`] as a mandatory
//! argument, so a call site structurally cannot gate an action without
//! having validated first.

use crate::context::ValidationContext;
use crate::error::ErrorReport;
use crate::normalize::CanonicalEntity;

/// Outcome of a gate check closure: `Ok` to allow, `Err` with the
/// user-facing reason to refuse.
type CheckFn = Box<dyn Fn(&CanonicalEntity, &ValidationContext) -> Result<(), String> + Send + Sync>;

/// A single blocking check.
pub struct GateCheck {
    name: String,
    check: CheckFn,
}

impl GateCheck {
    /// Creates a named check.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&CanonicalEntity, &ValidationContext) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

/// A blocking refusal of a state-changing action.
///
/// Unlike an [`ErrorReport`], this is surfaced to the user as a hard stop,
/// not a passive badge.
#[derive(Debug, thiserror::Error)]
#[error("action '{action}' refused: {}", reasons.join("; "))]
pub struct GateRefusal {
    /// The gated action's name.
    pub action: String,
    /// User-facing reasons, one per failed check.
    pub reasons: Vec<String>,
}

/// Named collection of blocking checks guarding one action.
///
/// # Example
///
/// ```rust
/// use canonform::{
///     normalize, ActionGate, Coerce, FieldSpec, GateCheck, NormalizationSpec,
///     parse_number, ErrorReport, ValidationContext,
/// };
/// use serde_json::json;
///
/// let gate = ActionGate::new("retiro").check(GateCheck::new("fondos", |entity, ctx| {
///     let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
///     let fondos = ctx.number_fact("fondos_disponibles").unwrap_or(0.0);
///     if monto > fondos {
///         Err(format!("requested ${:.2} exceeds available ${:.2}", monto, fondos))
///     } else {
///         Ok(())
///     }
/// }));
///
/// let spec = NormalizationSpec::new()
///     .field(FieldSpec::new("monto").coerce(Coerce::Currency).default(json!("$0.00")));
/// let entity = normalize(&json!({"monto": 60}), &spec);
/// let ctx = ValidationContext::new().with_fact("fondos_disponibles", json!(50.0));
///
/// // Normalization happily formatted $60.00, but the gate refuses.
/// assert!(gate.evaluate(&entity, &ErrorReport::empty(), &ctx).is_err());
/// ```
pub struct ActionGate {
    action: String,
    checks: Vec<GateCheck>,
}

impl ActionGate {
    /// Creates a gate for the named action.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            checks: Vec::new(),
        }
    }

    /// Adds a blocking check.
    pub fn check(mut self, check: GateCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Evaluates every check; all failing reasons are collected into one
    /// refusal (the gate never stops at the first failure).
    ///
    /// The advisory `report` is required so validation cannot be skipped;
    /// gating through with a non-valid report is allowed but logged, since
    /// advisory findings never block on their own.
    pub fn evaluate(
        &self,
        entity: &CanonicalEntity,
        report: &ErrorReport,
        ctx: &ValidationContext,
    ) -> Result<(), GateRefusal> {
        if !report.is_valid() {
            tracing::warn!(
                action = self.action.as_str(),
                advisory_errors = report.len(),
                "gating an action whose entity carries advisory validation errors"
            );
        }

        let reasons: Vec<String> = self
            .checks
            .iter()
            .filter_map(|c| (c.check)(entity, ctx).err().map(|reason| {
                tracing::warn!(
                    action = self.action.as_str(),
                    check = c.name.as_str(),
                    reason = reason.as_str(),
                    "gate check refused action"
                );
                reason
            }))
            .collect();

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(GateRefusal {
                action: self.action.clone(),
                reasons,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, parse_number, Coerce, FieldSpec, NormalizationSpec};
    use serde_json::json;

    fn monto_entity(raw: serde_json::Value) -> CanonicalEntity {
        let spec = NormalizationSpec::new()
            .field(FieldSpec::new("monto").coerce(Coerce::Currency).default(json!("$0.00")));
        normalize(&raw, &spec)
    }

    fn bounds_gate() -> ActionGate {
        ActionGate::new("retiro")
            .check(GateCheck::new("monto_minimo", |entity, _| {
                let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
                if monto < 100.0 {
                    Err(format!("minimum withdrawal is $100.00, got ${:.2}", monto))
                } else {
                    Ok(())
                }
            }))
            .check(GateCheck::new("fondos", |entity, ctx| {
                let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
                match ctx.number_fact("fondos_disponibles") {
                    Some(fondos) if monto <= fondos => Ok(()),
                    Some(fondos) => Err(format!(
                        "requested ${:.2} exceeds available ${:.2}",
                        monto, fondos
                    )),
                    None => Err("available funds are unknown".to_string()),
                }
            }))
    }

    #[test]
    fn test_gate_allows_valid_action() {
        let gate = bounds_gate();
        let entity = monto_entity(json!({"monto": 150}));
        let ctx = ValidationContext::new().with_fact("fondos_disponibles", json!(500.0));

        assert!(gate.evaluate(&entity, &ErrorReport::empty(), &ctx).is_ok());
    }

    #[test]
    fn test_gate_refuses_insufficient_funds() {
        let gate = bounds_gate();
        let entity = monto_entity(json!({"monto": 60}));
        let ctx = ValidationContext::new().with_fact("fondos_disponibles", json!(50.0));

        let refusal = gate.evaluate(&entity, &ErrorReport::empty(), &ctx).unwrap_err();
        assert_eq!(refusal.action, "retiro");
        // Both the bound and the funds check fail, and both are reported.
        assert_eq!(refusal.reasons.len(), 2);
        assert!(refusal.to_string().contains("refused"));
    }

    #[test]
    fn test_gate_refuses_when_funds_unknown() {
        let gate = bounds_gate();
        let entity = monto_entity(json!({"monto": 150}));

        let refusal = gate
            .evaluate(&entity, &ErrorReport::empty(), &ValidationContext::default())
            .unwrap_err();
        assert_eq!(refusal.reasons, vec!["available funds are unknown".to_string()]);
    }

    #[test]
    fn test_advisory_report_does_not_block() {
        let gate = bounds_gate();
        let entity = monto_entity(json!({"monto": 150}));
        let ctx = ValidationContext::new().with_fact("fondos_disponibles", json!(500.0));

        let mut report = ErrorReport::empty();
        report.insert("concepto", "required field missing");

        // Advisory findings are logged but never refuse on their own.
        assert!(gate.evaluate(&entity, &report, &ctx).is_ok());
    }
}
