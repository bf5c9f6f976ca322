//! Modelo de Ride
//!
//! Un viaje referencia customer, driver, vehicle y dos locations. La lectura
//! proyecta los nombres y direcciones de todas ellas.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, Reference, SqlValue};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ride {
    pub ride_id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub driver_id: i64,
    pub driver_name: String,
    pub vehicle_vin: String,
    pub vehicle_model: String,
    pub pickup_location: i64,
    pub pickup_address: String,
    pub dropoff_location: i64,
    pub dropoff_address: String,
    pub start_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl Entity for Ride {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "ride",
        label: "Ride",
        key_column: "ride_id",
        key_label: "ID",
        select: "SELECT r.ride_id, r.customer_id, c.customer_name, r.driver_id, d.driver_name, \
                 r.vehicle_vin, v.model AS vehicle_model, \
                 r.pickup_location, pl.address || ', ' || pl.city AS pickup_address, \
                 r.dropoff_location, dl.address || ', ' || dl.city AS dropoff_address, \
                 r.start_time, r.arrival_time \
                 FROM ride r \
                 JOIN customer c ON c.customer_id = r.customer_id \
                 JOIN driver d ON d.driver_id = r.driver_id \
                 JOIN vehicle v ON v.vehicle_vin = r.vehicle_vin \
                 JOIN location pl ON pl.location_id = r.pickup_location \
                 JOIN location dl ON dl.location_id = r.dropoff_location",
        key_filter: "r.ride_id",
        order_by: "r.ride_id DESC",
    };
}

const REQUIRED_FIELDS: [&str; 7] = [
    "customer_id",
    "driver_id",
    "vehicle_vin",
    "pickup_location",
    "dropoff_location",
    "start_time",
    "arrival_time",
];

#[derive(Debug, Clone)]
pub struct RideRequest {
    pub customer_id: i64,
    pub driver_id: i64,
    pub vehicle_vin: String,
    pub pickup_location: i64,
    pub dropoff_location: i64,
    pub start_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl FromPayload for RideRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&REQUIRED_FIELDS)?;
        Ok(Self {
            customer_id: payload.integer("customer_id", "Customer ID must be a valid number")?,
            driver_id: payload.integer("driver_id", "Driver ID must be a valid number")?,
            vehicle_vin: payload.text("vehicle_vin")?,
            pickup_location: payload
                .integer("pickup_location", "Pickup location must be a valid number")?,
            dropoff_location: payload
                .integer("dropoff_location", "Dropoff location must be a valid number")?,
            start_time: payload.timestamp("start_time")?,
            arrival_time: payload.timestamp("arrival_time")?,
        })
    }
}

impl Draft for RideRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("customer_id", SqlValue::BigInt(self.customer_id)),
            ("driver_id", SqlValue::BigInt(self.driver_id)),
            ("vehicle_vin", SqlValue::Text(self.vehicle_vin.clone())),
            ("pickup_location", SqlValue::BigInt(self.pickup_location)),
            ("dropoff_location", SqlValue::BigInt(self.dropoff_location)),
            ("start_time", SqlValue::Timestamp(self.start_time)),
            ("arrival_time", SqlValue::Timestamp(self.arrival_time)),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(
                "Customer",
                "customer",
                "customer_id",
                SqlValue::BigInt(self.customer_id),
            ),
            Reference::new("Driver", "driver", "driver_id", SqlValue::BigInt(self.driver_id)),
            Reference::new(
                "Vehicle",
                "vehicle",
                "vehicle_vin",
                SqlValue::Text(self.vehicle_vin.clone()),
            )
            .with_key_label("VIN"),
            Reference::new(
                "Pickup location",
                "location",
                "location_id",
                SqlValue::BigInt(self.pickup_location),
            ),
            Reference::new(
                "Dropoff location",
                "location",
                "location_id",
                SqlValue::BigInt(self.dropoff_location),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ride_json() -> serde_json::Value {
        json!({
            "customer_id": 1,
            "driver_id": "999999",
            "vehicle_vin": "FK-VIN-001",
            "pickup_location": 1,
            "dropoff_location": 2,
            "start_time": "2024-01-15 14:00:00",
            "arrival_time": "2024-01-15T14:30:00"
        })
    }

    #[test]
    fn test_parses_both_timestamp_separators() {
        let payload = Payload::from_value(ride_json()).unwrap();
        let request = RideRequest::from_payload(&payload, WriteMode::Create).unwrap();
        assert_eq!(request.driver_id, 999999);
        assert_eq!(
            (request.arrival_time - request.start_time).num_minutes(),
            30
        );
    }

    #[test]
    fn test_references_in_check_order() {
        let payload = Payload::from_value(ride_json()).unwrap();
        let request = RideRequest::from_payload(&payload, WriteMode::Create).unwrap();
        let messages: Vec<String> = request
            .references()
            .iter()
            .map(|r| r.missing_message())
            .collect();
        assert_eq!(
            messages,
            [
                "Customer with ID 1 does not exist",
                "Driver with ID 999999 does not exist",
                "Vehicle with VIN FK-VIN-001 does not exist",
                "Pickup location with ID 1 does not exist",
                "Dropoff location with ID 2 does not exist",
            ]
        );
    }

    #[test]
    fn test_missing_fields() {
        let payload = Payload::from_value(json!({"customer_id": 1})).unwrap();
        let err = RideRequest::from_payload(&payload, WriteMode::Create).unwrap_err();
        assert_eq!(
            err.client_message(),
            "Missing required fields: driver_id, vehicle_vin, pickup_location, dropoff_location, start_time, arrival_time"
        );
    }
}
