//! Controlador genérico de recursos CRUD
//!
//! Un `Resource` es una entidad con su request de escritura. El mismo
//! controlador sirve a los siete recursos de la API.

use sqlx::PgPool;

use crate::dto::payload::{FromPayload, Payload, WriteMode};
use crate::dto::ApiResponse;
use crate::models::{
    Customer, CustomerRequest, Driver, DriverRequest, Location, LocationRequest, Payment,
    PaymentRequest, Rating, RatingRequest, Ride, RideRequest, Vehicle, VehicleRequest,
};
use crate::repositories::crud_repository::{not_found_message, CrudRepository};
use crate::repositories::entity::{Draft, Entity};
use crate::utils::errors::{not_found_error, AppResult};

pub trait Resource: Entity {
    type Request: FromPayload + Draft + 'static;
}

impl Resource for Customer {
    type Request = CustomerRequest;
}

impl Resource for Driver {
    type Request = DriverRequest;
}

impl Resource for Vehicle {
    type Request = VehicleRequest;
}

impl Resource for Location {
    type Request = LocationRequest;
}

impl Resource for Ride {
    type Request = RideRequest;
}

impl Resource for Payment {
    type Request = PaymentRequest;
}

impl Resource for Rating {
    type Request = RatingRequest;
}

pub struct EntityController<E: Resource> {
    repository: CrudRepository<E>,
}

impl<E: Resource> EntityController<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CrudRepository::new(pool),
        }
    }

    /// Un identificador que no se puede interpretar no corresponde a ninguna fila
    pub fn parse_key(raw: &str) -> AppResult<E::Key> {
        raw.parse::<E::Key>()
            .map_err(|_| not_found_error(not_found_message::<E>(&raw)))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<E>>> {
        let rows = self.repository.list().await?;
        Ok(ApiResponse::success(rows))
    }

    pub async fn get_by_id(&self, key: &E::Key) -> AppResult<ApiResponse<E>> {
        let row = self.repository.get(key).await?;
        Ok(ApiResponse::success(row))
    }

    pub async fn create(&self, payload: Payload) -> AppResult<ApiResponse<E>> {
        let request = E::Request::from_payload(&payload, WriteMode::Create)?;
        let row = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(
            row,
            format!("{} created successfully", E::SCHEMA.label),
        ))
    }

    pub async fn update(&self, key: &E::Key, payload: Payload) -> AppResult<ApiResponse<E>> {
        let request = E::Request::from_payload(&payload, WriteMode::Update)?;
        let row = self.repository.update(key, &request).await?;
        Ok(ApiResponse::success_with_message(
            row,
            format!("{} updated successfully", E::SCHEMA.label),
        ))
    }

    pub async fn delete(&self, key: &E::Key) -> AppResult<ApiResponse<()>> {
        self.repository.delete(key).await?;
        Ok(ApiResponse::message(format!(
            "{} with {} {} deleted successfully",
            E::SCHEMA.label,
            E::SCHEMA.key_label,
            key
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_key() {
        assert_eq!(EntityController::<Customer>::parse_key("17").unwrap(), 17);
        let err = EntityController::<Customer>::parse_key("abc").unwrap_err();
        assert_eq!(err.client_message(), "Customer with ID abc not found");
    }

    #[test]
    fn test_vin_key_always_parses() {
        assert_eq!(
            EntityController::<Vehicle>::parse_key("1HGCM82633A004352").unwrap(),
            "1HGCM82633A004352"
        );
    }

    #[test]
    fn test_payment_key_label() {
        let err = EntityController::<Payment>::parse_key("9x").unwrap_err();
        assert_eq!(err.client_message(), "Payment with Transaction ID 9x not found");
    }

    #[test]
    fn test_unparseable_key_matches_missing_row_wording() {
        let err = EntityController::<Ride>::parse_key("latest").unwrap_err();
        assert_eq!(err.client_message(), not_found_message::<Ride>(&"latest"));
        assert_eq!(err.client_message(), "Ride with ID latest not found");
    }
}
