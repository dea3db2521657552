//! User sub-entity normalization.
//!
//! Users arrive embedded in transactions, reservations, and notifications
//! under a half-dozen historical shapes. The alias chain resolves
//! `nombre`, then `name`, then the nested `usuario.nombre`, then a join of
//! `firstName` and `lastName`; when nothing usable arrives the renderer
//! shows "Usuario desconocido" with a synthesized badge.

use serde_json::json;

use crate::compose::EntityProfile;
use crate::normalize::{Coerce, FieldSpec, NormalizationSpec};
use crate::schema::{ObjectSchema, Schema};

pub fn user_spec() -> NormalizationSpec {
    NormalizationSpec::new()
        .field(
            FieldSpec::new("nombre")
                .alias("name")
                .nested(["usuario", "nombre"])
                .join(["firstName", "lastName"])
                .coerce(Coerce::Text)
                .default(json!("Usuario desconocido"))
                .required(),
        )
        .field(
            FieldSpec::new("email")
                .alias("correo")
                .nested(["usuario", "email"])
                .coerce(Coerce::Text)
                .default(json!("")),
        )
}

pub fn user_schema() -> ObjectSchema {
    Schema::object()
        .field("nombre", Schema::string().min_len(1))
        .optional("email", Schema::string())
}

pub fn user_profile() -> EntityProfile {
    EntityProfile::new(user_spec(), user_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_alias_chain_precedence() {
        let entity = normalize(
            &json!({"name": "Ana", "firstName": "A", "lastName": "M"}),
            &user_spec(),
        );
        assert_eq!(entity.get_str("nombre"), Some("Ana"));

        let entity = normalize(&json!({"firstName": "A", "lastName": "M"}), &user_spec());
        assert_eq!(entity.get_str("nombre"), Some("A M"));
    }

    #[test]
    fn test_unknown_user_fallback() {
        let (entity, report) = user_profile().run(&json!({}), &ValidationContext::default());
        assert_eq!(entity.get_str("nombre"), Some("Usuario desconocido"));
        assert!(entity.is_synthesized("nombre"));
        // The fallback renders, but the required field is still reported.
        assert!(!report.messages_at("nombre").is_empty());
    }

    #[test]
    fn test_nested_user_shape() {
        let entity = normalize(&json!({"usuario": {"nombre": "Luis", "email": "l@x.mx"}}), &user_spec());
        assert_eq!(entity.get_str("nombre"), Some("Luis"));
        assert_eq!(entity.get_str("email"), Some("l@x.mx"));
    }
}
