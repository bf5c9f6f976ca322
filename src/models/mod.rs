//! Modelos del sistema
//!
//! Este módulo contiene los modelos que mapean las tablas PostgreSQL,
//! los requests validados de escritura y las filas de los reportes.

pub mod customer;
pub mod driver;
pub mod location;
pub mod payment;
pub mod rating;
pub mod report;
pub mod ride;
pub mod vehicle;

pub use customer::{Customer, CustomerRequest};
pub use driver::{Driver, DriverRequest};
pub use location::{Location, LocationRequest};
pub use payment::{Payment, PaymentRequest};
pub use rating::{Rating, RatingRequest};
pub use ride::{Ride, RideRequest};
pub use vehicle::{Vehicle, VehicleRequest};
