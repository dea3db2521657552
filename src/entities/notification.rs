//! Notification entities.

use serde_json::json;

use crate::compose::EntityProfile;
use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ObjectSchema, Schema};

pub fn notification_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("titulo")
                .alias("title")
                .coerce(Coerce::Text)
                .default(json!("Notificación"))
                .required(),
        )
        .field(
            FieldSpec::new("mensaje")
                .alias("message")
                .alias("body")
                .coerce(Coerce::Text)
                .default(json!("")),
        )
        .field(
            FieldSpec::new("tipo")
                .alias("type")
                .coerce(Coerce::Text)
                .default(json!("info")),
        )
        .field(
            FieldSpec::new("leida")
                .alias("read")
                .coerce(Coerce::Raw)
                .default(json!(false)),
        )
        .field(
            FieldSpec::new("fecha")
                .alias("date")
                .alias("createdAt")
                .coerce(Coerce::Date)
                .default_now(),
        )
}

pub fn notification_schema() -> ObjectSchema {
    Schema::object()
        .field("titulo", Schema::string().min_len(1))
        .optional("mensaje", Schema::string())
        .field(
            "tipo",
            Schema::string().one_of(["info", "reserva", "pago", "sistema"]),
        )
        .field("leida", Schema::boolean())
        .field("fecha", Schema::string().min_len(1))
}

pub fn notification_profile() -> EntityProfile {
    EntityProfile::new(notification_spec(), notification_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use serde_json::json;

    #[test]
    fn test_notification_defaults() {
        let (entity, report) = notification_profile().run(
            &json!({"title": "Reserva confirmada", "type": "reserva"}),
            &ValidationContext::default(),
        );
        assert_eq!(entity.get_str("titulo"), Some("Reserva confirmada"));
        assert_eq!(entity.get("leida"), Some(&json!(false)));
        assert!(entity.is_synthesized("leida"));
        assert!(report.is_valid());
    }

    #[test]
    fn test_non_boolean_leida_reported() {
        // Raw coercion passes the malformed value through; the schema
        // flags it instead of the normalizer guessing.
        let (_, report) = notification_profile().run(
            &json!({"titulo": "Hola", "leida": "sí"}),
            &ValidationContext::default(),
        );
        assert!(!report.messages_at("leida").is_empty());
    }

    #[test]
    fn test_unknown_tipo_reported() {
        let (_, report) = notification_profile().run(
            &json!({"titulo": "Hola", "tipo": "promo"}),
            &ValidationContext::default(),
        );
        assert!(!report.messages_at("tipo").is_empty());
    }
}
