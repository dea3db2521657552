//! Normalizer properties: totality, idempotence, alias precedence, and
//! coercion behavior on real payload shapes.

use canonform::{normalize, Coerce, FieldSpec, NormalizationSpec};
use serde_json::json;

fn transaction_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("concepto")
                .alias("description")
                .coerce(Coerce::Text)
                .default(json!("Sin concepto")),
        )
        .field(
            FieldSpec::new("monto")
                .alias("amount")
                .coerce(Coerce::Currency)
                .default(json!("$0.00")),
        )
        .field(
            FieldSpec::new("fecha")
                .alias("date")
                .coerce(Coerce::Date)
                .default(json!("2024-01-01T00:00:00+00:00")),
        )
}

#[test]
fn test_totality_over_hostile_inputs() {
    let spec = transaction_spec();
    let hostile = vec![
        json!(null),
        json!(42),
        json!("not an object"),
        json!([{"monto": 10}]),
        json!({"monto": {"nested": "garbage"}, "fecha": [1, 2]}),
    ];

    for raw in hostile {
        let entity = normalize(&raw, &spec);
        // Every declared field is present regardless of input shape.
        for name in ["concepto", "monto", "fecha"] {
            assert!(entity.get(name).is_some(), "missing '{}' for {}", name, raw);
        }
    }
}

#[test]
fn test_idempotence_over_canonical_fields() {
    let spec = transaction_spec();
    let raws = vec![
        json!({"description": "Reserva", "amount": "1,200.5", "date": "2024-05-01"}),
        json!({"monto": "abc", "fecha": "garbage"}),
        json!({}),
    ];

    for raw in raws {
        let once = normalize(&raw, &spec);
        let twice = normalize(&once.to_value(), &spec);
        assert_eq!(once.as_value(), twice.as_value(), "not idempotent for {}", raw);
    }
}

#[test]
fn test_alias_precedence_is_declaration_order() {
    let spec = NormalizationSpec::new().field(
        FieldSpec::new("nombre")
            .alias("name")
            .join(["firstName", "lastName"])
            .coerce(Coerce::Text)
            .default(json!("Usuario desconocido")),
    );

    // All sources present: canonical wins.
    let entity = normalize(
        &json!({"nombre": "Canónica", "name": "Ana", "firstName": "A", "lastName": "M"}),
        &spec,
    );
    assert_eq!(entity.get_str("nombre"), Some("Canónica"));

    // First alias wins over the join.
    let entity = normalize(&json!({"name": "Ana", "firstName": "A", "lastName": "M"}), &spec);
    assert_eq!(entity.get_str("nombre"), Some("Ana"));

    // Join as last resort.
    let entity = normalize(&json!({"firstName": "A", "lastName": "M"}), &spec);
    assert_eq!(entity.get_str("nombre"), Some("A M"));
    assert!(!entity.is_synthesized("nombre"));
}

#[test]
fn test_currency_coercion_table() {
    let spec = NormalizationSpec::new()
        .field(FieldSpec::new("monto").coerce(Coerce::Currency).default(json!("$0.00")));

    let cases = vec![
        (json!({"monto": "49.9"}), "$49.90", false),
        (json!({"monto": 49}), "$49.00", false),
        (json!({"monto": "$1,200.50"}), "$1200.50", false),
        (json!({"monto": "abc"}), "$0.00", true),
        (json!({}), "$0.00", true),
    ];

    for (raw, expected, synthesized) in cases {
        let entity = normalize(&raw, &spec);
        assert_eq!(entity.get_str("monto"), Some(expected), "for {}", raw);
        assert_eq!(entity.is_synthesized("monto"), synthesized, "for {}", raw);
    }
}

#[test]
fn test_date_coercion_accepts_both_wire_formats() {
    let spec = NormalizationSpec::new()
        .field(FieldSpec::new("fecha").coerce(Coerce::Date).default(json!("2024-01-01T00:00:00+00:00")));

    let entity = normalize(&json!({"fecha": "2024-05-01"}), &spec);
    assert_eq!(entity.get_str("fecha"), Some("2024-05-01T00:00:00+00:00"));

    let entity = normalize(&json!({"fecha": "2024-05-01T09:30:00-06:00"}), &spec);
    assert_eq!(entity.get_str("fecha"), Some("2024-05-01T09:30:00-06:00"));
    assert!(!entity.is_synthesized("fecha"));
}

#[test]
fn test_price_shapes_converge() {
    let spec = NormalizationSpec::new().field(
        FieldSpec::new("precio")
            .coerce(Coerce::Price)
            .default(json!({"valor": "$0.00", "periodicidad": "mensual"})),
    );

    let from_bare = normalize(&json!({"precio": 49.99}), &spec);
    let from_structured = normalize(&json!({"precio": {"valor": "49.99"}}), &spec);
    assert_eq!(from_bare.get("precio"), from_structured.get("precio"));
    assert_eq!(
        from_bare.get("precio"),
        Some(&json!({"valor": "$49.99", "periodicidad": "mensual"}))
    );
}
