use sqlx::PgPool;
use tracing::debug;

use crate::models::report::{
    CustomerRide, DriverAverageRating, LocationActivity, RevenueByMethod, TopDriver,
};
use crate::utils::errors::AppResult;

/// Consultas agregadas de solo lectura. Los empates se ordenan por clave.
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Viajes por conductor, incluyendo conductores sin viajes
    pub async fn top_drivers(&self) -> AppResult<Vec<TopDriver>> {
        let rows = sqlx::query_as::<_, TopDriver>(
            r#"
            SELECT d.driver_id, d.driver_name, COUNT(r.ride_id) AS ride_count
            FROM driver d
            LEFT JOIN ride r ON r.driver_id = d.driver_id
            GROUP BY d.driver_id, d.driver_name
            ORDER BY ride_count DESC, d.driver_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("📊 top-drivers: {} filas", rows.len());
        Ok(rows)
    }

    pub async fn revenue_by_method(&self) -> AppResult<Vec<RevenueByMethod>> {
        let rows = sqlx::query_as::<_, RevenueByMethod>(
            r#"
            SELECT payment_method,
                   SUM(amount) AS total_revenue,
                   COUNT(*) AS transaction_count
            FROM payment
            GROUP BY payment_method
            ORDER BY total_revenue DESC, payment_method
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("📊 revenue-by-method: {} filas", rows.len());
        Ok(rows)
    }

    /// Promedio de calificación por conductor; sin calificaciones no aparece
    pub async fn average_ratings(&self) -> AppResult<Vec<DriverAverageRating>> {
        let rows = sqlx::query_as::<_, DriverAverageRating>(
            r#"
            SELECT d.driver_id, d.driver_name,
                   ROUND(AVG(rt.driver_rating), 2) AS avg_rating,
                   COUNT(rt.rating_id) AS rating_count
            FROM driver d
            JOIN ride r ON r.driver_id = d.driver_id
            JOIN rating rt ON rt.ride_id = r.ride_id
            GROUP BY d.driver_id, d.driver_name
            ORDER BY avg_rating DESC, d.driver_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("📊 average-ratings: {} filas", rows.len());
        Ok(rows)
    }

    /// Conteos de recogida y destino independientes por ubicación
    pub async fn rides_by_location(&self) -> AppResult<Vec<LocationActivity>> {
        let rows = sqlx::query_as::<_, LocationActivity>(
            r#"
            SELECT l.location_id, l.address, l.city,
                   COUNT(DISTINCT pickup.ride_id) AS pickup_count,
                   COUNT(DISTINCT dropoff.ride_id) AS dropoff_count,
                   COUNT(DISTINCT pickup.ride_id) + COUNT(DISTINCT dropoff.ride_id) AS total_count
            FROM location l
            LEFT JOIN ride pickup ON pickup.pickup_location = l.location_id
            LEFT JOIN ride dropoff ON dropoff.dropoff_location = l.location_id
            GROUP BY l.location_id, l.address, l.city
            ORDER BY total_count DESC, l.location_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("📊 rides-by-location: {} filas", rows.len());
        Ok(rows)
    }

    pub async fn customer_exists(&self, customer_id: i64) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customer WHERE customer_id = $1)",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Viajes del customer, más recientes primero, con su pago si existe
    pub async fn customer_history(&self, customer_id: i64) -> AppResult<Vec<CustomerRide>> {
        let rows = sqlx::query_as::<_, CustomerRide>(
            r#"
            SELECT r.ride_id, r.start_time, r.arrival_time,
                   d.driver_name,
                   v.model AS vehicle_model,
                   pl.address AS pickup_address,
                   dl.address AS dropoff_address,
                   p.amount, p.payment_status
            FROM ride r
            JOIN driver d ON d.driver_id = r.driver_id
            JOIN vehicle v ON v.vehicle_vin = r.vehicle_vin
            JOIN location pl ON pl.location_id = r.pickup_location
            JOIN location dl ON dl.location_id = r.dropoff_location
            LEFT JOIN payment p ON p.ride_id = r.ride_id
            WHERE r.customer_id = $1
            ORDER BY r.start_time DESC, r.ride_id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("📊 customer-history {}: {} filas", customer_id, rows.len());
        Ok(rows)
    }
}
