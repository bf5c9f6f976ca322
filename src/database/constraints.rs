//! Traducción de violaciones de integridad
//!
//! Los errores de PostgreSQL se clasifican por su tipo estructurado
//! (`ErrorKind`) y el nombre de la restricción declarado en las migraciones.
//! Nunca se inspecciona el texto del mensaje.

use sqlx::error::ErrorKind;

use crate::utils::errors::AppError;

/// Tipo de operación que disparó el error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Write,
    Delete,
}

/// Mensajes asociados a una restricción con nombre
#[derive(Debug)]
pub struct ConstraintRule {
    pub name: &'static str,
    pub on_write: Option<&'static str>,
    pub on_delete: Option<&'static str>,
}

const CUSTOMER_HAS_RIDES: &str =
    "Cannot delete customer with existing rides. Please delete associated rides first.";
const DRIVER_HAS_DEPENDENTS: &str =
    "Cannot delete driver with existing vehicles or rides. Please delete associated records first.";
const VEHICLE_HAS_RIDES: &str =
    "Cannot delete vehicle with existing rides. Please delete associated rides first.";
const LOCATION_HAS_RIDES: &str =
    "Cannot delete location that is used in existing rides. Please delete associated rides first.";
const RIDE_HAS_DEPENDENTS: &str =
    "Cannot delete ride with existing payments or ratings. Please delete associated records first.";

pub const CONSTRAINT_RULES: &[ConstraintRule] = &[
    ConstraintRule {
        name: "customer_email_key",
        on_write: Some("A customer with this email already exists"),
        on_delete: None,
    },
    ConstraintRule {
        name: "driver_license_number_key",
        on_write: Some("A driver with this license number already exists"),
        on_delete: None,
    },
    ConstraintRule {
        name: "vehicle_pkey",
        on_write: Some("A vehicle with this VIN already exists"),
        on_delete: None,
    },
    ConstraintRule {
        name: "vehicle_registration_year_check",
        on_write: Some("Registration year must be between 1900 and 2100"),
        on_delete: None,
    },
    ConstraintRule {
        name: "vehicle_driver_id_fkey",
        on_write: Some("Selected driver does not exist"),
        on_delete: Some(DRIVER_HAS_DEPENDENTS),
    },
    ConstraintRule {
        name: "ride_customer_id_fkey",
        on_write: Some("Selected customer does not exist"),
        on_delete: Some(CUSTOMER_HAS_RIDES),
    },
    ConstraintRule {
        name: "ride_driver_id_fkey",
        on_write: Some("Selected driver does not exist"),
        on_delete: Some(DRIVER_HAS_DEPENDENTS),
    },
    ConstraintRule {
        name: "ride_vehicle_vin_fkey",
        on_write: Some("Selected vehicle does not exist"),
        on_delete: Some(VEHICLE_HAS_RIDES),
    },
    ConstraintRule {
        name: "ride_pickup_location_fkey",
        on_write: Some("Selected pickup location does not exist"),
        on_delete: Some(LOCATION_HAS_RIDES),
    },
    ConstraintRule {
        name: "ride_dropoff_location_fkey",
        on_write: Some("Selected dropoff location does not exist"),
        on_delete: Some(LOCATION_HAS_RIDES),
    },
    ConstraintRule {
        name: "payment_ride_id_fkey",
        on_write: Some("Selected ride does not exist"),
        on_delete: Some(RIDE_HAS_DEPENDENTS),
    },
    ConstraintRule {
        name: "payment_amount_check",
        on_write: Some("Amount must be a positive number"),
        on_delete: None,
    },
    ConstraintRule {
        name: "rating_ride_id_fkey",
        on_write: Some("Selected ride does not exist"),
        on_delete: Some(RIDE_HAS_DEPENDENTS),
    },
    ConstraintRule {
        name: "rating_customer_rating_check",
        on_write: Some("Customer rating must be between 1 and 5"),
        on_delete: None,
    },
    ConstraintRule {
        name: "rating_driver_rating_check",
        on_write: Some("Driver rating must be between 1 and 5"),
        on_delete: None,
    },
];

/// SQLSTATE string_data_right_truncation
const STRING_TOO_LONG: &str = "22001";
/// SQLSTATE numeric_value_out_of_range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

pub fn find_rule(name: &str) -> Option<&'static ConstraintRule> {
    CONSTRAINT_RULES.iter().find(|rule| rule.name == name)
}

/// Traducir una violación de integridad a un error de cliente.
/// Devuelve `None` cuando el error no es una violación conocida.
pub fn resolve(
    kind: ErrorKind,
    constraint: Option<&str>,
    operation: Operation,
    label: &str,
) -> Option<AppError> {
    let rule = constraint.and_then(find_rule);
    let on_write = rule.and_then(|r| r.on_write).map(str::to_string);

    match (kind, operation) {
        (ErrorKind::ForeignKeyViolation, Operation::Delete) => {
            Some(AppError::DeleteBlocked(
                rule.and_then(|r| r.on_delete)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!(
                            "Cannot delete {} due to data integrity constraints.",
                            label.to_lowercase()
                        )
                    }),
            ))
        }
        (ErrorKind::ForeignKeyViolation, Operation::Write) => Some(AppError::InvalidReference(
            on_write.unwrap_or_else(|| "Referenced record does not exist".to_string()),
        )),
        (ErrorKind::UniqueViolation, _) => Some(AppError::Integrity(
            on_write.unwrap_or_else(|| format!("{} already exists", label)),
        )),
        (ErrorKind::CheckViolation, _) => Some(AppError::Integrity(
            on_write.unwrap_or_else(|| "Data violates integrity constraints".to_string()),
        )),
        (ErrorKind::NotNullViolation, _) => Some(AppError::BadRequest(
            "Missing required value".to_string(),
        )),
        _ => None,
    }
}

/// Clasificar un error de SQLx producido durante `operation` sobre `label`
pub fn classify(err: sqlx::Error, operation: Operation, label: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(mapped) = resolve(db_err.kind(), db_err.constraint(), operation, label) {
            return mapped;
        }
        if let Some(mapped) = db_err.code().as_deref().and_then(resolve_code) {
            return mapped;
        }
    }
    AppError::Database(err)
}

/// Errores de datos que no nombran una restricción
pub fn resolve_code(code: &str) -> Option<AppError> {
    match code {
        STRING_TOO_LONG => Some(AppError::BadRequest(
            "One or more values exceed the maximum length".to_string(),
        )),
        NUMERIC_OUT_OF_RANGE => Some(AppError::BadRequest(
            "One or more numeric values are out of range".to_string(),
        )),
        _ => None,
    }
}
