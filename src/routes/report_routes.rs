use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::{EntityController, ReportController};
use crate::dto::ApiResponse;
use crate::models::Customer;
use crate::models::report::{
    CustomerHistory, DriverAverageRating, LocationActivity, RevenueByMethod, TopDriver,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/top-drivers", get(top_drivers))
        .route("/revenue-by-method", get(revenue_by_method))
        .route("/average-ratings", get(average_ratings))
        .route("/rides-by-location", get(rides_by_location))
        .route("/customer-history/:customer_id", get(customer_history))
}

async fn top_drivers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TopDriver>>>> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.top_drivers().await?))
}

async fn revenue_by_method(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<RevenueByMethod>>>> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.revenue_by_method().await?))
}

async fn average_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<DriverAverageRating>>>> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.average_ratings().await?))
}

async fn rides_by_location(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<LocationActivity>>>> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.rides_by_location().await?))
}

async fn customer_history(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<CustomerHistory>> {
    let customer_id = EntityController::<Customer>::parse_key(&customer_id)?;
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.customer_history(customer_id).await?))
}
