pub mod entity_routes;
pub mod health_routes;
pub mod report_routes;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware_with_origins;
use crate::models::{Customer, Driver, Location, Payment, Rating, Ride, Vehicle};
use crate::state::AppState;
use entity_routes::create_entity_router;

/// Router completo de la API con CORS, trazas y fallback 404
pub fn create_router(state: AppState) -> Router {
    let cors = cors_middleware_with_origins(&state.config.cors_origins);

    Router::new()
        .route("/api/health", get(health_routes::health_check))
        .nest("/api/customers", create_entity_router::<Customer>())
        .nest("/api/drivers", create_entity_router::<Driver>())
        .nest("/api/vehicles", create_entity_router::<Vehicle>())
        .nest("/api/locations", create_entity_router::<Location>())
        .nest("/api/rides", create_entity_router::<Ride>())
        .nest("/api/payments", create_entity_router::<Payment>())
        .nest("/api/ratings", create_entity_router::<Rating>())
        .nest("/api/reports", report_routes::create_report_router())
        .fallback(health_routes::endpoint_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Tabla de endpoints para el log de arranque
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/api/health"),
    ("GET/POST", "/api/customers"),
    ("GET/PUT/DELETE", "/api/customers/:id"),
    ("GET/POST", "/api/drivers"),
    ("GET/PUT/DELETE", "/api/drivers/:id"),
    ("GET/POST", "/api/vehicles"),
    ("GET/PUT/DELETE", "/api/vehicles/:vin"),
    ("GET/POST", "/api/locations"),
    ("GET/PUT/DELETE", "/api/locations/:id"),
    ("GET/POST", "/api/rides"),
    ("GET/PUT/DELETE", "/api/rides/:id"),
    ("GET/POST", "/api/payments"),
    ("GET/PUT/DELETE", "/api/payments/:id"),
    ("GET/POST", "/api/ratings"),
    ("GET/PUT/DELETE", "/api/ratings/:id"),
    ("GET", "/api/reports/top-drivers"),
    ("GET", "/api/reports/revenue-by-method"),
    ("GET", "/api/reports/average-ratings"),
    ("GET", "/api/reports/rides-by-location"),
    ("GET", "/api/reports/customer-history/:customer_id"),
];
