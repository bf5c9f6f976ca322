//! Ride Records API
//!
//! API REST sobre PostgreSQL para los registros de una plataforma de
//! viajes: customers, drivers, vehicles, locations, rides, payments,
//! ratings y reportes agregados.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
