//! Host earnings summary.
//!
//! Amounts stay numeric in canonical form so the consistency invariant
//! compares values; rendering formats them separately.

use serde_json::json;
use stillwater::Validation;

use crate::compose::EntityProfile;
use crate::error::{SchemaError, SchemaErrors};
use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ObjectSchema, Schema};

pub fn earnings_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("total")
                .alias("totalGanancias")
                .coerce(Coerce::Number)
                .default(json!(0.0))
                .required(),
        )
        .field(
            FieldSpec::new("comision")
                .alias("commission")
                .coerce(Coerce::Number)
                .default(json!(0.0)),
        )
        .field(
            FieldSpec::new("disponible")
                .alias("available")
                .coerce(Coerce::Number)
                .default(json!(0.0))
                .required(),
        )
        .field(
            FieldSpec::new("pendiente")
                .alias("pending")
                .coerce(Coerce::Number)
                .default(json!(0.0)),
        )
}

pub fn earnings_schema() -> ObjectSchema {
    Schema::object()
        .field("total", Schema::number().non_negative())
        .field("comision", Schema::number().non_negative())
        .field("disponible", Schema::number().non_negative())
        .field("pendiente", Schema::number().non_negative())
        .invariant(|obj, path, _ctx| {
            let get = |k: &str| obj.get(k).and_then(|v| v.as_f64()).unwrap_or(0.0);
            let expected = get("total") - get("comision");
            if (get("disponible") - expected).abs() > 0.01 {
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        path.push_field("disponible"),
                        "available amount must equal total minus commission",
                    )
                    .with_code("available_mismatch")
                    .with_expected(format!("{:.2}", expected))
                    .with_got(format!("{:.2}", get("disponible"))),
                ))
            } else {
                Validation::Success(())
            }
        })
}

pub fn earnings_profile() -> EntityProfile {
    EntityProfile::new(earnings_spec(), earnings_schema())
}
