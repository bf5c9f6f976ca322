//! Cuerpo JSON de las escrituras
//!
//! `Payload` envuelve el objeto recibido y ofrece accesores que aplican las
//! reglas comunes: campos requeridos, coerción de números escritos como
//! string, decimales, timestamps y fechas.

use std::str::FromStr;

use axum::Json;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::validation::{parse_date, parse_timestamp};

/// Tipo de escritura que recibe el payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Construcción de un request validado a partir del cuerpo JSON
pub trait FromPayload: Sized {
    fn from_payload(payload: &Payload, mode: WriteMode) -> AppResult<Self>;
}

#[derive(Debug, Clone)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Un cuerpo ausente, ilegible, que no es objeto o vacío es "No data provided"
    pub fn from_body(body: Option<Json<Value>>) -> AppResult<Self> {
        match body {
            Some(Json(Value::Object(map))) if !map.is_empty() => Ok(Self(map)),
            _ => Err(bad_request_error("No data provided")),
        }
    }

    pub fn from_value(value: Value) -> AppResult<Self> {
        Self::from_body(Some(Json(value)))
    }

    /// Un campo falta si no existe, es null o es un string en blanco
    fn is_present(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    pub fn require(&self, fields: &[&str]) -> AppResult<()> {
        let missing: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|field| !self.is_present(field))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(bad_request_error(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    fn present(&self, field: &str) -> Option<&Value> {
        if self.is_present(field) {
            self.0.get(field)
        } else {
            None
        }
    }

    fn required(&self, field: &str) -> AppResult<&Value> {
        self.present(field)
            .ok_or_else(|| bad_request_error(format!("Missing required fields: {}", field)))
    }

    pub fn text(&self, field: &str) -> AppResult<String> {
        value_as_text(self.required(field)?)
            .ok_or_else(|| bad_request_error(format!("Invalid value for {}", field)))
    }

    pub fn optional_text(&self, field: &str) -> AppResult<Option<String>> {
        match self.present(field) {
            None => Ok(None),
            Some(value) => value_as_text(value)
                .map(Some)
                .ok_or_else(|| bad_request_error(format!("Invalid value for {}", field))),
        }
    }

    /// Entero; acepta números JSON enteros y strings numéricos
    pub fn integer<T: TryFrom<i64>>(&self, field: &str, message: &str) -> AppResult<T> {
        value_as_integer(self.required(field)?).ok_or_else(|| bad_request_error(message))
    }

    pub fn decimal(&self, field: &str, message: &str) -> AppResult<Decimal> {
        let raw = match self.required(field)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => return Err(bad_request_error(message)),
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| bad_request_error(message))
    }

    pub fn timestamp(&self, field: &str) -> AppResult<NaiveDateTime> {
        self.required(field)?
            .as_str()
            .and_then(parse_timestamp)
            .ok_or_else(|| {
                bad_request_error(format!(
                    "Invalid {} format. Use YYYY-MM-DD HH:MM:SS",
                    field
                ))
            })
    }

    pub fn date(&self, field: &str) -> AppResult<NaiveDate> {
        self.required(field)?
            .as_str()
            .and_then(parse_date)
            .ok_or_else(|| bad_request_error(format!("Invalid {} format. Use YYYY-MM-DD", field)))
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_integer<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    let wide = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    T::try_from(wide).ok()
}
