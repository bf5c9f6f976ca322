//! Modelo de Driver

use serde::Serialize;
use sqlx::FromRow;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, SqlValue};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Driver {
    pub driver_id: i64,
    pub driver_name: String,
    pub phone_number: String,
    pub license_number: String,
}

impl Entity for Driver {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "driver",
        label: "Driver",
        key_column: "driver_id",
        key_label: "ID",
        select: "SELECT driver_id, driver_name, phone_number, license_number FROM driver",
        key_filter: "driver_id",
        order_by: "driver_id",
    };
}

#[derive(Debug, Clone)]
pub struct DriverRequest {
    pub driver_name: String,
    pub phone_number: String,
    pub license_number: String,
}

impl FromPayload for DriverRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&["driver_name", "phone_number", "license_number"])?;
        Ok(Self {
            driver_name: payload.text("driver_name")?,
            phone_number: payload.text("phone_number")?,
            license_number: payload.text("license_number")?,
        })
    }
}

impl Draft for DriverRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("driver_name", SqlValue::Text(self.driver_name.clone())),
            ("phone_number", SqlValue::Text(self.phone_number.clone())),
            ("license_number", SqlValue::Text(self.license_number.clone())),
        ]
    }
}
