//! Withdrawal requests and their blocking gate.
//!
//! Withdrawal is the one state-changing action in the crate: advisory
//! validation still never blocks rendering the request form, but
//! submitting runs [`withdrawal_gate`], which refuses amounts outside
//! `[100, 50000]` and amounts exceeding the session's available funds.

use serde_json::json;

use crate::compose::EntityProfile;
use crate::gate::{ActionGate, GateCheck};
use crate::normalize::{parse_number, Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ObjectSchema, Schema};

pub const MIN_WITHDRAWAL: f64 = 100.0;
pub const MAX_WITHDRAWAL: f64 = 50_000.0;

pub fn withdrawal_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("monto")
                .alias("amount")
                .coerce(Coerce::Currency)
                .default(json!("$0.00"))
                .required(),
        )
        .field(
            FieldSpec::new("metodo")
                .alias("method")
                .coerce(Coerce::Text)
                .default(json!("transferencia")),
        )
}

pub fn withdrawal_schema() -> ObjectSchema {
    Schema::object()
        .field("monto", Schema::string().min_len(1))
        .field(
            "metodo",
            Schema::string().one_of(["transferencia", "paypal"]),
        )
}

pub fn withdrawal_profile() -> EntityProfile {
    EntityProfile::new(withdrawal_spec(), withdrawal_schema())
}

/// The blocking gate evaluated before submitting a withdrawal.
///
/// An unknown balance refuses the withdrawal: absence of the
/// `fondos_disponibles` fact is treated as insufficient funds, never as
/// permission.
pub fn withdrawal_gate() -> ActionGate {
    ActionGate::new("retiro")
        .check(GateCheck::new("monto_minimo", |entity, _ctx| {
            let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
            if monto < MIN_WITHDRAWAL {
                Err(format!(
                    "el monto mínimo de retiro es ${:.2}, se solicitó ${:.2}",
                    MIN_WITHDRAWAL, monto
                ))
            } else {
                Ok(())
            }
        }))
        .check(GateCheck::new("monto_maximo", |entity, _ctx| {
            let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
            if monto > MAX_WITHDRAWAL {
                Err(format!(
                    "el monto máximo de retiro es ${:.2}, se solicitó ${:.2}",
                    MAX_WITHDRAWAL, monto
                ))
            } else {
                Ok(())
            }
        }))
        .check(GateCheck::new("fondos_suficientes", |entity, ctx| {
            let monto = entity.get("monto").and_then(parse_number).unwrap_or(0.0);
            match ctx.number_fact("fondos_disponibles") {
                Some(fondos) if monto <= fondos => Ok(()),
                Some(fondos) => Err(format!(
                    "fondos insuficientes: se solicitó ${:.2} con ${:.2} disponibles",
                    monto, fondos
                )),
                None => Err("no se conoce el saldo disponible".to_string()),
            }
        }))
}
