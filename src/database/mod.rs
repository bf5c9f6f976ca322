//! Módulo de base de datos
//!
//! Maneja la conexión y la traducción de errores de PostgreSQL

pub mod connection;
pub mod constraints;

pub use connection::DatabaseConnection;
pub use constraints::{classify, Operation};
