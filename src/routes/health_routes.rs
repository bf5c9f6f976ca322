use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Estado estático del servidor; no consulta la base de datos
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Server is running",
        "status": "healthy"
    }))
}

/// Fallback para rutas inexistentes
pub async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found"
        })),
    )
}
