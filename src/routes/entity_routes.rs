use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::{EntityController, Resource};
use crate::dto::{ApiResponse, Payload};
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// `GET/POST /` y `GET/PUT/DELETE /:id` para cualquier recurso
pub fn create_entity_router<E: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entities::<E>).post(create_entity::<E>))
        .route(
            "/:id",
            get(get_entity::<E>)
                .put(update_entity::<E>)
                .delete(delete_entity::<E>),
        )
}

async fn list_entities<E: Resource>(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<E>>>> {
    let controller = EntityController::<E>::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<E>>> {
    let key = EntityController::<E>::parse_key(&id)?;
    let controller = EntityController::<E>::new(state.pool.clone());
    let response = controller.get_by_id(&key).await?;
    Ok(Json(response))
}

async fn create_entity<E: Resource>(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> AppResult<(StatusCode, Json<ApiResponse<E>>)> {
    let payload = Payload::from_body(body)?;
    let controller = EntityController::<E>::new(state.pool.clone());
    let response = controller.create(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> AppResult<Json<ApiResponse<E>>> {
    let key = EntityController::<E>::parse_key(&id)?;
    let payload = Payload::from_body(body)?;
    let controller = EntityController::<E>::new(state.pool.clone());
    let response = controller.update(&key, payload).await?;
    Ok(Json(response))
}

async fn delete_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let key = EntityController::<E>::parse_key(&id)?;
    let controller = EntityController::<E>::new(state.pool.clone());
    let response = controller.delete(&key).await?;
    Ok(Json(response))
}
