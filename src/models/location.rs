//! Modelo de Location

use serde::Serialize;
use sqlx::FromRow;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, SqlValue};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub location_id: i64,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl Entity for Location {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "location",
        label: "Location",
        key_column: "location_id",
        key_label: "ID",
        select: "SELECT location_id, address, city, postal_code FROM location",
        key_filter: "location_id",
        order_by: "location_id",
    };
}

#[derive(Debug, Clone)]
pub struct LocationRequest {
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl FromPayload for LocationRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&["address", "city", "postal_code"])?;
        Ok(Self {
            address: payload.text("address")?,
            city: payload.text("city")?,
            postal_code: payload.text("postal_code")?,
        })
    }
}

impl Draft for LocationRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("address", SqlValue::Text(self.address.clone())),
            ("city", SqlValue::Text(self.city.clone())),
            ("postal_code", SqlValue::Text(self.postal_code.clone())),
        ]
    }
}
