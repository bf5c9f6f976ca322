//! Esquema genérico de entidades
//!
//! Cada tabla se describe con un `EntitySchema` estático. El repositorio
//! genérico construye todas sus consultas a partir de esa descripción.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres, Row};

/// Descripción estática de una tabla y su proyección de lectura
#[derive(Debug)]
pub struct EntitySchema {
    pub table: &'static str,
    /// Nombre legible usado en los mensajes ("Customer", "Vehicle")
    pub label: &'static str,
    pub key_column: &'static str,
    /// Cómo se nombra la clave en los mensajes ("ID", "VIN")
    pub key_label: &'static str,
    /// `SELECT ... FROM ... JOIN ...` sin WHERE ni ORDER BY
    pub select: &'static str,
    /// Columna de clave calificada dentro de `select`
    pub key_filter: &'static str,
    pub order_by: &'static str,
}

/// Fila de una tabla con su esquema
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    type Key: Key;

    const SCHEMA: EntitySchema;
}

/// Tipos válidos como clave primaria
pub trait Key: FromStr + fmt::Display + Clone + Send + Sync + 'static {
    fn to_value(&self) -> SqlValue;

    fn from_row(row: &PgRow, column: &str) -> Result<Self, sqlx::Error>;
}

impl Key for i64 {
    fn to_value(&self) -> SqlValue {
        SqlValue::BigInt(*self)
    }

    fn from_row(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
        row.try_get(column)
    }
}

impl Key for String {
    fn to_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }

    fn from_row(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
        row.try_get(column)
    }
}

/// Valor de columna listo para enlazar a una consulta
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    OptionalText(Option<String>),
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl SqlValue {
    pub fn bind<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::OptionalText(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::BigInt(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::Timestamp(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(v) => write!(f, "{}", v),
            SqlValue::OptionalText(Some(v)) => write!(f, "{}", v),
            SqlValue::OptionalText(None) => write!(f, "null"),
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::BigInt(v) => write!(f, "{}", v),
            SqlValue::Decimal(v) => write!(f, "{}", v),
            SqlValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            SqlValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

/// Referencia a otra tabla que debe existir antes de escribir
#[derive(Debug, Clone)]
pub struct Reference {
    /// Nombre en los mensajes ("Driver", "Pickup location")
    pub label: &'static str,
    pub key_label: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub value: SqlValue,
}

impl Reference {
    pub fn new(
        label: &'static str,
        table: &'static str,
        column: &'static str,
        value: SqlValue,
    ) -> Self {
        Self {
            label,
            key_label: "ID",
            table,
            column,
            value,
        }
    }

    pub fn with_key_label(mut self, key_label: &'static str) -> Self {
        self.key_label = key_label;
        self
    }

    pub fn missing_message(&self) -> String {
        format!(
            "{} with {} {} does not exist",
            self.label, self.key_label, self.value
        )
    }
}

/// Datos validados de una escritura (create o update)
pub trait Draft: Send + Sync {
    /// Columnas en el orden en que se escriben. Puede incluir la clave
    /// cuando ésta es natural (VIN); el UPDATE la omite.
    fn columns(&self) -> Vec<(&'static str, SqlValue)>;

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}
