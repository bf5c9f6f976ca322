//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el sobre `{success: false, error}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Una clave foránea apunta a un registro inexistente
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Violación de unicidad o de CHECK al escribir
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Borrado bloqueado por registros dependientes
    #[error("Delete blocked: {0}")]
    DeleteBlocked(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::InvalidReference(_)
            | AppError::Integrity(_)
            | AppError::DeleteBlocked(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensaje visible para el cliente. Los errores 500 nunca exponen detalles.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(errors) => first_validation_message(errors),
            AppError::BadRequest(msg)
            | AppError::InvalidReference(msg)
            | AppError::Integrity(msg)
            | AppError::DeleteBlocked(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Database(_) => "Internal server error".to_string(),
        }
    }
}

/// Primer mensaje de validación, ordenando por nombre de campo para que la
/// respuesta sea estable.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields
        .into_iter()
        .find_map(|field| {
            field_errors.get(field).and_then(|list| list.first()).map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .unwrap_or_else(|| "Invalid data provided".to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.client_message();

        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ {} -> {}", status, message);
        }

        let body = ErrorResponse {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

/// Resultado estándar de la aplicación
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(message: impl Into<String>) -> AppError {
    AppError::NotFound(message.into())
}

/// Función helper para crear errores de request inválido
pub fn bad_request_error(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{ValidationError, ValidationErrors};

    fn validation_error(message: &'static str) -> ValidationError {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Borrowed(message));
        error
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(bad_request_error("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found_error("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DeleteBlocked("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_validation_message_is_first_field_alphabetically() {
        let mut errors = ValidationErrors::new();
        errors.add("driver_rating", validation_error("Driver rating must be between 1 and 5"));
        errors.add(
            "customer_rating",
            validation_error("Customer rating must be between 1 and 5"),
        );

        let err = AppError::from(errors);
        assert_eq!(err.client_message(), "Customer rating must be between 1 and 5");
    }

    #[test]
    fn test_validation_without_message_names_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("regex"));
        assert_eq!(
            AppError::from(errors).client_message(),
            "Invalid value for email"
        );
    }
}
