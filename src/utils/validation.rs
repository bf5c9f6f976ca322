//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Formato de email aceptado por la API
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Formatos de fecha y hora aceptados en los timestamps de viajes
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Validar que un valor sea estrictamente positivo
pub fn validate_positive<T: Zero + PartialOrd>(value: T) -> Result<(), ValidationError> {
    if value <= T::zero() {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

/// Decimales admitidos por la columna `NUMERIC(10,2)`
pub const AMOUNT_SCALE: u32 = 2;

/// Mayor monto que cabe en `NUMERIC(10,2)`
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, AMOUNT_SCALE)
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validar un monto (usado por `#[validate(custom)]`): positivo, con dos
/// decimales como máximo y dentro del rango de la columna
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
        .map_err(|_| amount_error("positive", "Amount must be a positive number"))?;
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error(
            "scale",
            "Amount must have at most two decimal places",
        ));
    }
    if *value > max_amount() {
        return Err(amount_error(
            "max_amount",
            "Amount must not exceed 99999999.99",
        ));
    }
    Ok(())
}

/// Convertir un string a timestamp sin zona horaria
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Convertir un string a fecha (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_email_regex() {
        assert!(EMAIL_REGEX.is_match("alice@example.com"));
        assert!(EMAIL_REGEX.is_match("first.last+tag@mail.example.org"));
        assert!(!EMAIL_REGEX.is_match("not-an-email"));
        assert!(!EMAIL_REGEX.is_match("missing@tld"));
        assert!(!EMAIL_REGEX.is_match("spaces in@example.com"));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-3.5).is_err());
    }

    fn amount_message(raw: &str) -> Option<String> {
        validate_amount(&Decimal::from_str(raw).unwrap())
            .err()
            .and_then(|error| error.message)
            .map(|message| message.to_string())
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(
            amount_message("-10.00").as_deref(),
            Some("Amount must be a positive number")
        );
        assert_eq!(
            amount_message("10.005").as_deref(),
            Some("Amount must have at most two decimal places")
        );
        assert_eq!(
            amount_message("100000000").as_deref(),
            Some("Amount must not exceed 99999999.99")
        );
        assert_eq!(amount_message("0.01"), None);
        assert_eq!(amount_message("10.500"), None);
        assert_eq!(amount_message("99999999.99"), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-15T14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T14:00"), Some(expected));
        assert_eq!(parse_timestamp("15/01/2024"), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date("2023-02-29"), None);
    }
}
