//! Filas de los reportes agregados

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopDriver {
    pub driver_id: i64,
    pub driver_name: String,
    pub ride_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenueByMethod {
    pub payment_method: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverAverageRating {
    pub driver_id: i64,
    pub driver_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_rating: Decimal,
    pub rating_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LocationActivity {
    pub location_id: i64,
    pub address: String,
    pub city: String,
    pub pickup_count: i64,
    pub dropoff_count: i64,
    pub total_count: i64,
}

/// Un viaje en el historial de un customer; el pago puede no existir
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerRide {
    pub ride_id: i64,
    pub start_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub driver_name: String,
    pub vehicle_model: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub payment_status: Option<String>,
}

/// Historial con el total de viajes del customer
#[derive(Debug, Serialize)]
pub struct CustomerHistory {
    pub success: bool,
    pub customer_id: i64,
    pub total_rides: usize,
    pub data: Vec<CustomerRide>,
}

impl CustomerHistory {
    pub fn new(customer_id: i64, data: Vec<CustomerRide>) -> Self {
        Self {
            success: true,
            customer_id,
            total_rides: data.len(),
            data,
        }
    }
}
