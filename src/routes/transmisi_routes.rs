use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};

use crate::controllers::transmisi_controller::TransmisiController;
use crate::dto::transmisi_dto::TransmisiRequest;
use crate::dto::ApiResponse;
use crate::models::Transmisi;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::FormOrJson;

pub fn create_transmisi_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transmisi))
        .route("/store", post(create_transmisi))
        .route("/:id", get(get_transmisi))
        .route("/update/:id", patch(update_transmisi))
        .route("/delete/:id", delete(delete_transmisi))
}

fn controller(state: &AppState) -> TransmisiController {
    TransmisiController::new(state.transmisi.clone())
}

async fn list_transmisi(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Transmisi>>>> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_transmisi(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Transmisi>>> {
    let response = controller(&state).get_by_id(&id).await?;
    Ok(Json(response))
}

async fn create_transmisi(
    State(state): State<AppState>,
    FormOrJson(request): FormOrJson<TransmisiRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Transmisi>>)> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_transmisi(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(request): FormOrJson<TransmisiRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let response = controller(&state).update(&id, request).await?;
    Ok(Json(response))
}

async fn delete_transmisi(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let response = controller(&state).delete(&id).await?;
    Ok(Json(response))
}
