//! DTOs de la API
//!
//! Sobre de respuesta común y lectura del cuerpo JSON de las escrituras.

pub mod api_response;
pub mod payload;

pub use api_response::ApiResponse;
pub use payload::{FromPayload, Payload, WriteMode};
