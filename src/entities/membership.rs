//! Membership entities.
//!
//! The membership endpoint is the worst offender for shape drift: `precio`
//! arrives as a bare number on the list endpoint and as a structured
//! `{valor, periodicidad}` object on the detail endpoint. Normalization
//! canonicalizes both to the structured form; the schema accepts either
//! shape via [`ConditionalSchema`].

use std::sync::Arc;

use serde_json::json;

use crate::compose::EntityProfile;
use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ConditionalSchema, ObjectSchema, Schema, ValueValidator};

pub fn membership_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("nombre")
                .alias("name")
                .alias("titulo")
                .coerce(Coerce::Text)
                .default(json!("Membresía"))
                .required(),
        )
        .field(
            FieldSpec::new("precio")
                .alias("price")
                .coerce(Coerce::Price)
                .default(json!({"valor": "$0.00", "periodicidad": "mensual"}))
                .required(),
        )
        .field(
            FieldSpec::new("beneficios")
                .alias("benefits")
                .coerce(Coerce::Raw)
                .default(json!([])),
        )
}

/// Accepts a price in either wire shape.
///
/// The bare branch validates list-endpoint payloads (`49.99`); the
/// structured branch validates both detail-endpoint payloads and the
/// canonical form, where `valor` is already a currency string.
pub fn precio_schema() -> ConditionalSchema {
    let bare: Arc<dyn ValueValidator> = Arc::new(Schema::number().positive());
    let structured: Arc<dyn ValueValidator> = Arc::new(
        Schema::object()
            .field("valor", Schema::string().min_len(1))
            .field(
                "periodicidad",
                Schema::string().one_of(["mensual", "anual"]),
            ),
    );
    Schema::conditional(move |value| {
        if value.is_object() {
            Arc::clone(&structured)
        } else {
            Arc::clone(&bare)
        }
    })
}

pub fn membership_schema() -> ObjectSchema {
    Schema::object()
        .field("nombre", Schema::string().min_len(1))
        .field("precio", precio_schema())
        .field("beneficios", Schema::array(Schema::string().min_len(1)))
}

pub fn membership_profile() -> EntityProfile {
    EntityProfile::new(membership_spec(), membership_schema())
}
