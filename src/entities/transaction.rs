//! Transaction detail entities.
//!
//! A transaction view is composed of up to four independently-fetched
//! parts: the transaction itself plus optional reservation, payment, and
//! invoice sections. Each part gets its own profile; `transaction_composer`
//! wires them into one [`EntityComposer`].
//!
//! Schemas here validate the canonical form produced by the matching spec:
//! amounts are currency strings, dates are RFC 3339 strings.

use serde_json::json;
use stillwater::Validation;

use crate::compose::{EntityComposer, EntityProfile};
use crate::error::{SchemaError, SchemaErrors};
use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ObjectSchema, Schema};

pub fn transaction_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("concepto")
                .alias("descripcion")
                .alias("description")
                .coerce(Coerce::Text)
                .default(json!("Sin concepto"))
                .required(),
        )
        .field(
            FieldSpec::new("monto")
                .alias("amount")
                .alias("importe")
                .coerce(Coerce::Currency)
                .default(json!("$0.00"))
                .required(),
        )
        .field(
            FieldSpec::new("fecha")
                .alias("date")
                .alias("createdAt")
                .coerce(Coerce::Date)
                .default_now(),
        )
        .field(
            FieldSpec::new("estado")
                .alias("status")
                .coerce(Coerce::Text)
                .default(json!("pendiente")),
        )
}

pub fn transaction_schema() -> ObjectSchema {
    Schema::object()
        .field("concepto", Schema::string().min_len(1))
        .field("monto", Schema::string().min_len(1))
        .field("fecha", Schema::string().min_len(1))
        .field(
            "estado",
            Schema::string().one_of(["pendiente", "pagado", "cancelado", "reembolsado"]),
        )
}

pub fn transaction_profile() -> EntityProfile {
    EntityProfile::new(transaction_spec(), transaction_schema())
}

pub fn reservation_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("espacio")
                .alias("space")
                .nested(["espacio", "nombre"])
                .coerce(Coerce::Text)
                .default(json!("Espacio desconocido"))
                .required(),
        )
        .field(
            FieldSpec::new("fecha")
                .alias("date")
                .coerce(Coerce::Date)
                .default_now(),
        )
        .field(
            FieldSpec::new("horaInicio")
                .alias("startTime")
                .coerce(Coerce::Text)
                .default(json!("00:00")),
        )
        .field(
            FieldSpec::new("horaFin")
                .alias("endTime")
                .coerce(Coerce::Text)
                .default(json!("00:00")),
        )
}

/// Reservation times are `HH:MM` strings; lexicographic order matches
/// chronological order within a day, and same-day reservations never span
/// midnight.
pub fn reservation_schema() -> ObjectSchema {
    Schema::object()
        .field("espacio", Schema::string().min_len(1))
        .field("fecha", Schema::string().min_len(1))
        .field("horaInicio", Schema::string().min_len(1))
        .field("horaFin", Schema::string().min_len(1))
        .invariant(|obj, path, _ctx| {
            let inicio = obj.get("horaInicio").and_then(|v| v.as_str()).unwrap_or("");
            let fin = obj.get("horaFin").and_then(|v| v.as_str()).unwrap_or("");
            if fin <= inicio {
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        path.push_field("horaFin"),
                        "end time must be after start time",
                    )
                    .with_code("time_order")
                    .with_got(fin)
                    .with_expected(format!("later than {}", inicio)),
                ))
            } else {
                Validation::Success(())
            }
        })
}

pub fn reservation_profile() -> EntityProfile {
    EntityProfile::new(reservation_spec(), reservation_schema())
}

pub fn payment_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("metodo")
                .alias("method")
                .alias("metodoPago")
                .coerce(Coerce::Text)
                .default(json!("efectivo"))
                .required(),
        )
        .field(
            FieldSpec::new("monto")
                .alias("amount")
                .coerce(Coerce::Currency)
                .default(json!("$0.00"))
                .required(),
        )
        .field(
            FieldSpec::new("fecha")
                .alias("date")
                .coerce(Coerce::Date)
                .default_now(),
        )
}

pub fn payment_schema() -> ObjectSchema {
    Schema::object()
        .field(
            "metodo",
            Schema::string().one_of(["tarjeta", "efectivo", "transferencia"]),
        )
        .field("monto", Schema::string().min_len(1))
        .field("fecha", Schema::string().min_len(1))
}

pub fn payment_profile() -> EntityProfile {
    EntityProfile::new(payment_spec(), payment_schema())
}

pub fn invoice_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("folio")
                .alias("numero")
                .coerce(Coerce::Text)
                .default(json!("")),
        )
        .field(
            FieldSpec::new("subtotal")
                .coerce(Coerce::Number)
                .default(json!(0.0)),
        )
        .field(
            FieldSpec::new("descuentoTotal")
                .alias("descuento_total")
                .alias("descuento")
                .coerce(Coerce::Number)
                .default(json!(0.0)),
        )
        .field(
            FieldSpec::new("total")
                .coerce(Coerce::Number)
                .default(json!(0.0))
                .required(),
        )
}

/// Amounts stay numeric in the canonical invoice so the arithmetic
/// invariant compares values, not rendered strings.
pub fn invoice_schema() -> ObjectSchema {
    Schema::object()
        .optional("folio", Schema::string())
        .field("subtotal", Schema::number().non_negative())
        .field("descuentoTotal", Schema::number().non_negative())
        .field("total", Schema::number().non_negative())
        .invariant(|obj, path, _ctx| {
            let get = |k: &str| obj.get(k).and_then(|v| v.as_f64()).unwrap_or(0.0);
            let expected = get("subtotal") - get("descuentoTotal");
            if (get("total") - expected).abs() > 0.01 {
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        path.push_field("total"),
                        "total must equal subtotal minus discount",
                    )
                    .with_code("total_mismatch")
                    .with_expected(format!("{:.2}", expected))
                    .with_got(format!("{:.2}", get("total"))),
                ))
            } else {
                Validation::Success(())
            }
        })
}

pub fn invoice_profile() -> EntityProfile {
    EntityProfile::new(invoice_spec(), invoice_schema())
}

/// The composer for the transaction detail view.
pub fn transaction_composer() -> EntityComposer {
    EntityComposer::new(
        transaction_profile(),
        reservation_profile(),
        payment_profile(),
        invoice_profile(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ComposerParts;
    use crate::context::ValidationContext;
    use serde_json::json;

    #[test]
    fn test_transaction_canonicalizes_aliases() {
        let (entity, report) = transaction_profile().run(
            &json!({"description": "Reserva Sala A", "amount": "1,200.5", "status": "pagado"}),
            &ValidationContext::default(),
        );
        assert_eq!(entity.get_str("concepto"), Some("Reserva Sala A"));
        assert_eq!(entity.get_str("monto"), Some("$1200.50"));
        assert_eq!(entity.get_str("estado"), Some("pagado"));
        assert!(report.is_valid());
    }

    #[test]
    fn test_transaction_unknown_estado() {
        let (_, report) = transaction_profile().run(
            &json!({"concepto": "Pago", "monto": 100, "estado": "archivado"}),
            &ValidationContext::default(),
        );
        assert!(!report.messages_at("estado").is_empty());
    }

    #[test]
    fn test_reservation_time_order_invariant() {
        let (_, report) = reservation_profile().run(
            &json!({"espacio": "Sala A", "fecha": "2024-05-01", "horaInicio": "11:00", "horaFin": "09:00"}),
            &ValidationContext::default(),
        );
        assert!(!report.messages_at("horaFin").is_empty());
    }

    #[test]
    fn test_invoice_invariant_tolerance() {
        let profile = invoice_profile();
        let ctx = ValidationContext::default();

        let (_, report) = profile.run(
            &json!({"subtotal": 100.0, "descuentoTotal": 10.0, "total": 90.0}),
            &ctx,
        );
        assert!(report.is_valid());

        let (_, report) = profile.run(
            &json!({"subtotal": 100.0, "descuentoTotal": 10.0, "total": 95.0}),
            &ctx,
        );
        assert_eq!(report.messages_at("total").len(), 1);
    }

    #[test]
    fn test_composed_view_sections() {
        let composer = transaction_composer();
        let parts = ComposerParts {
            transaction: json!({"concepto": "Pago mensual", "monto": 500, "estado": "pagado"}),
            reservation: None,
            payment: Some(json!({"metodo": "tarjeta", "monto": 500})),
            invoice: Some(json!({"subtotal": 500, "descuentoTotal": 0, "total": 495})),
        };

        let vm = composer.compose(&parts, &ValidationContext::default());
        assert!(vm.section_validity.get("reservation").is_none());
        assert_eq!(vm.section_validity.get("payment"), Some(&true));
        assert_eq!(vm.section_validity.get("invoice"), Some(&false));
        assert!(!vm.report.messages_at("invoice.total").is_empty());
    }
}
