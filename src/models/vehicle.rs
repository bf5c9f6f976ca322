//! Modelo de Vehicle
//!
//! La clave primaria es el VIN, asignado por el cliente al crear y nunca
//! modificado por un update. Todo vehículo se registra con su conductor.

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, Reference, SqlValue};
use crate::utils::errors::AppResult;

/// Vehicle con el nombre del conductor asignado (LEFT JOIN)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub vehicle_vin: String,
    pub model: String,
    pub color: String,
    pub registration_year: i32,
    pub driver_id: Option<i64>,
    pub driver_name: Option<String>,
}

impl Entity for Vehicle {
    type Key = String;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "vehicle",
        label: "Vehicle",
        key_column: "vehicle_vin",
        key_label: "VIN",
        select: "SELECT v.vehicle_vin, v.model, v.color, v.registration_year, v.driver_id, \
                 d.driver_name \
                 FROM vehicle v \
                 LEFT JOIN driver d ON d.driver_id = v.driver_id",
        key_filter: "v.vehicle_vin",
        order_by: "v.vehicle_vin",
    };
}

const CREATE_FIELDS: [&str; 5] = [
    "vehicle_vin",
    "model",
    "color",
    "registration_year",
    "driver_id",
];
const UPDATE_FIELDS: [&str; 4] = ["model", "color", "registration_year", "driver_id"];

/// Request para crear o reemplazar un vehículo
#[derive(Debug, Clone, Validate)]
pub struct VehicleRequest {
    /// Solo presente al crear
    pub vehicle_vin: Option<String>,
    pub model: String,
    pub color: String,
    #[validate(range(
        min = 1900,
        max = 2100,
        message = "Registration year must be between 1900 and 2100"
    ))]
    pub registration_year: i32,
    pub driver_id: i64,
}

impl FromPayload for VehicleRequest {
    fn from_payload(payload: &Payload, mode: WriteMode) -> AppResult<Self> {
        let vehicle_vin = match mode {
            WriteMode::Create => {
                payload.require(&CREATE_FIELDS)?;
                Some(payload.text("vehicle_vin")?)
            }
            WriteMode::Update => {
                payload.require(&UPDATE_FIELDS)?;
                None
            }
        };

        let request = Self {
            vehicle_vin,
            model: payload.text("model")?,
            color: payload.text("color")?,
            registration_year: payload
                .integer("registration_year", "Registration year must be a valid number")?,
            driver_id: payload.integer("driver_id", "Driver ID must be a valid number")?,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Draft for VehicleRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        let mut columns = Vec::with_capacity(5);
        if let Some(vin) = &self.vehicle_vin {
            columns.push(("vehicle_vin", SqlValue::Text(vin.clone())));
        }
        columns.push(("model", SqlValue::Text(self.model.clone())));
        columns.push(("color", SqlValue::Text(self.color.clone())));
        columns.push(("registration_year", SqlValue::Int(self.registration_year)));
        columns.push(("driver_id", SqlValue::BigInt(self.driver_id)));
        columns
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(
            "Driver",
            "driver",
            "driver_id",
            SqlValue::BigInt(self.driver_id),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value, mode: WriteMode) -> AppResult<VehicleRequest> {
        VehicleRequest::from_payload(&Payload::from_value(value).unwrap(), mode)
    }

    #[test]
    fn test_create_requires_vin() {
        let err = parse(
            json!({"model": "Corolla", "color": "Blue", "registration_year": 2020, "driver_id": 1}),
            WriteMode::Create,
        )
        .unwrap_err();
        assert_eq!(err.client_message(), "Missing required fields: vehicle_vin");
    }

    #[test]
    fn test_update_ignores_vin() {
        let request = parse(
            json!({"vehicle_vin": "OTHER", "model": "Corolla", "color": "Blue", "registration_year": "2021", "driver_id": 1}),
            WriteMode::Update,
        )
        .unwrap();
        assert_eq!(request.vehicle_vin, None);
        assert_eq!(request.registration_year, 2021);
        assert!(request.columns().iter().all(|(c, _)| *c != "vehicle_vin"));
    }

    #[test]
    fn test_registration_year_rules() {
        let out_of_range = parse(
            json!({"vehicle_vin": "V1", "model": "M", "color": "C", "registration_year": 1899, "driver_id": 1}),
            WriteMode::Create,
        )
        .unwrap_err();
        assert_eq!(
            out_of_range.client_message(),
            "Registration year must be between 1900 and 2100"
        );

        let not_a_number = parse(
            json!({"vehicle_vin": "V1", "model": "M", "color": "C", "registration_year": "new", "driver_id": 1}),
            WriteMode::Create,
        )
        .unwrap_err();
        assert_eq!(
            not_a_number.client_message(),
            "Registration year must be a valid number"
        );
    }

    #[test]
    fn test_driver_is_required() {
        let err = parse(
            json!({"vehicle_vin": "V1", "model": "M", "color": "C", "registration_year": 2020}),
            WriteMode::Create,
        )
        .unwrap_err();
        assert_eq!(err.client_message(), "Missing required fields: driver_id");

        let err = parse(
            json!({"model": "M", "color": "C", "registration_year": 2020}),
            WriteMode::Update,
        )
        .unwrap_err();
        assert_eq!(err.client_message(), "Missing required fields: driver_id");
    }

    #[test]
    fn test_driver_reference_is_checked() {
        let request = parse(
            json!({"vehicle_vin": "V1", "model": "M", "color": "C", "registration_year": 2020, "driver_id": 999999}),
            WriteMode::Create,
        )
        .unwrap();
        assert_eq!(
            request.references()[0].missing_message(),
            "Driver with ID 999999 does not exist"
        );
    }
}
