//! Modelo de Rating

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::repositories::entity::{Draft, Entity, EntitySchema, Reference, SqlValue};
use crate::utils::errors::AppResult;

const RATING_FORMAT: &str = "Invalid rating format. Ratings must be integers.";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rating {
    pub rating_id: i64,
    pub ride_id: i64,
    pub customer_rating: i32,
    pub driver_rating: i32,
    pub comments: Option<String>,
    pub customer_name: Option<String>,
    pub driver_name: Option<String>,
}

impl Entity for Rating {
    type Key = i64;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "rating",
        label: "Rating",
        key_column: "rating_id",
        key_label: "ID",
        select: "SELECT rt.rating_id, rt.ride_id, rt.customer_rating, rt.driver_rating, \
                 rt.comments, c.customer_name, d.driver_name \
                 FROM rating rt \
                 LEFT JOIN ride r ON r.ride_id = rt.ride_id \
                 LEFT JOIN customer c ON c.customer_id = r.customer_id \
                 LEFT JOIN driver d ON d.driver_id = r.driver_id",
        key_filter: "rt.rating_id",
        order_by: "rt.rating_id",
    };
}

#[derive(Debug, Clone, Validate)]
pub struct RatingRequest {
    pub ride_id: i64,
    #[validate(range(min = 1, max = 5, message = "Customer rating must be between 1 and 5"))]
    pub customer_rating: i32,
    #[validate(range(min = 1, max = 5, message = "Driver rating must be between 1 and 5"))]
    pub driver_rating: i32,
    pub comments: Option<String>,
}

impl FromPayload for RatingRequest {
    fn from_payload(payload: &Payload, _mode: WriteMode) -> AppResult<Self> {
        payload.require(&["ride_id", "customer_rating", "driver_rating"])?;
        let request = Self {
            ride_id: payload.integer("ride_id", "Ride ID must be a valid number")?,
            customer_rating: payload.integer("customer_rating", RATING_FORMAT)?,
            driver_rating: payload.integer("driver_rating", RATING_FORMAT)?,
            comments: payload.optional_text("comments")?,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Draft for RatingRequest {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("ride_id", SqlValue::BigInt(self.ride_id)),
            ("customer_rating", SqlValue::Int(self.customer_rating)),
            ("driver_rating", SqlValue::Int(self.driver_rating)),
            ("comments", SqlValue::OptionalText(self.comments.clone())),
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
