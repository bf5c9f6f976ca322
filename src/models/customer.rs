//! Modelo de Customer
//!
//! Fila de la tabla `customer` y el request validado para crearla o reemplazarla.

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, SqlValue};
use crate::utils::errors::AppResult;
use crate::utils::validation::EMAIL_REGEX;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub customer_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
}

impl Entity for Customer {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "customer",
        label: "Customer",
        key_column: "customer_id",
        key_label: "ID",
        select: "SELECT customer_id, customer_name, phone_number, email FROM customer",
        key_filter: "customer_id",
        order_by: "customer_id",
    };
}

/// Request para crear o reemplazar un customer
#[derive(Debug, Clone, Validate)]
pub struct CustomerRequest {
    pub customer_name: String,
    pub phone_number: String,
    #[validate(regex(path = "EMAIL_REGEX", message = "Invalid email format"))]
    pub email: String,
}

impl FromPayload for CustomerRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&["customer_name", "phone_number", "email"])?;
        let request = Self {
            customer_name: payload.text("customer_name")?,
            phone_number: payload.text("phone_number")?,
            email: payload.text("email")?,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Draft for CustomerRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("customer_name", SqlValue::Text(self.customer_name.clone())),
            ("phone_number", SqlValue::Text(self.phone_number.clone())),
            ("email", SqlValue::Text(self.email.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_email_is_rejected() {
        let payload = Payload::from_value(json!({
            "customer_name": "Ana Torres",
            "phone_number": "555-0101",
            "email": "ana-at-example"
        }))
        .unwrap();
        let err = CustomerRequest::from_payload(&payload, WriteMode::Create).unwrap_err();
        assert_eq!(err.client_message(), "Invalid email format");
    }

    #[test]
    fn test_valid_customer_columns() {
        let payload = Payload::from_value(json!({
            "customer_name": "Ana Torres",
            "phone_number": "555-0101",
            "email": "ana@example.com"
        }))
        .unwrap();
        let request = CustomerRequest::from_payload(&payload, WriteMode::Create).unwrap();
        let names: Vec<_> = request.columns().into_iter().map(|(c, _)| c).collect();
        assert_eq!(names, ["customer_name", "phone_number", "email"]);
        assert!(request.references().is_empty());
    }
}
