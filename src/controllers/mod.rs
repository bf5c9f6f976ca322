//! Controladores
//!
//! Orquestan la validación del request y las llamadas a los repositorios.

pub mod entity_controller;
pub mod report_controller;

pub use entity_controller::{EntityController, Resource};
pub use report_controller::ReportController;
