//! Modelo de Payment

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, Reference, SqlValue};
use crate::utils::errors::AppResult;
use crate::utils::validation::validate_amount;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
    pub transaction_id: i64,
    pub ride_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: NaiveDate,
    pub customer_name: Option<String>,
    pub driver_name: Option<String>,
}

impl Entity for Payment {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "payment",
        label: "Payment",
        key_column: "transaction_id",
        key_label: "Transaction ID",
        select: "SELECT p.transaction_id, p.ride_id, p.amount, p.payment_method, \
                 p.payment_status, p.payment_date, c.customer_name, d.driver_name \
                 FROM payment p \
                 LEFT JOIN ride r ON r.ride_id = p.ride_id \
                 LEFT JOIN customer c ON c.customer_id = r.customer_id \
                 LEFT JOIN driver d ON d.driver_id = r.driver_id",
        key_filter: "p.transaction_id",
        order_by: "p.transaction_id",
    };
}

#[derive(Debug, Clone, Validate)]
pub struct PaymentRequest {
    pub ride_id: i64,
    #[validate(custom = "validate_amount")]
    pub amount: Decimal,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: NaiveDate,
}

impl FromPayload for PaymentRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&[
            "ride_id",
            "amount",
            "payment_method",
            "payment_status",
            "payment_date",
        ])?;
        let request = Self {
            ride_id: payload.integer("ride_id", "Ride ID must be a valid number")?,
            amount: payload.decimal("amount", "Invalid amount format")?,
            payment_method: payload.text("payment_method")?,
            payment_status: payload.text("payment_status")?,
            payment_date: payload.date("payment_date")?,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Draft for PaymentRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("ride_id", SqlValue::BigInt(self.ride_id)),
            ("amount", SqlValue::Decimal(self.amount)),
            ("payment_method", SqlValue::Text(self.payment_method.clone())),
            ("payment_status", SqlValue::Text(self.payment_status.clone())),
            ("payment_date", SqlValue::Date(self.payment_date)),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(
            "Ride",
            "ride",
            "ride_id",
            SqlValue::BigInt(self.ride_id),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(amount: serde_json::Value) -> AppResult<PaymentRequest> {
        let payload = Payload::from_value(json!({
            "ride_id": 1,
            "amount": amount,
            "payment_method": "Credit Card",
            "payment_status": "Completed",
            "payment_date": "2024-01-15"
        }))
        .unwrap();
        PaymentRequest::from_payload(&payload, WriteMode::Create)
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(
            parse(json!(-5)).unwrap_err().client_message(),
            "Amount must be a positive number"
        );
        assert_eq!(
            parse(json!(0)).unwrap_err().client_message(),
            "Amount must be a positive number"
        );
        assert_eq!(
            parse(json!("lots")).unwrap_err().client_message(),
            "Invalid amount format"
        );
        assert!(parse(json!("25.50")).is_ok());
    }

    #[test]
    fn test_amount_fits_the_column() {
        assert_eq!(
            parse(json!(1000000000)).unwrap_err().client_message(),
            "Amount must not exceed 99999999.99"
        );
        assert_eq!(
            parse(json!("10.005")).unwrap_err().client_message(),
            "Amount must have at most two decimal places"
        );
        assert_eq!(parse(json!(99999999.99)).unwrap().amount.to_string(), "99999999.99");
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let payment = Payment {
            transaction_id: 1,
            ride_id: 1,
            amount: Decimal::new(2550, 2),
            payment_method: "Cash".into(),
            payment_status: "Completed".into(),
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            customer_name: None,
            driver_name: None,
        };
        let body = serde_json::to_value(payment).unwrap();
        assert_eq!(body["amount"], json!(25.5));
        assert_eq!(body["payment_date"], json!("2024-01-15"));
    }
}
