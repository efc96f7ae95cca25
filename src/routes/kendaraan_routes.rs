use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::kendaraan_controller::KendaraanController;
use crate::dto::kendaraan_dto::{
    CreateKendaraanRequest, KendaraanCreatedResponse, KendaraanUpdatedResponse, UpdateKendaraanRequest,
};
use crate::dto::ApiResponse;
use crate::models::Kendaraan;
use crate::services::upload_service::read_multipart;
use crate::services::UploadedImage;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::extract::{BodyKind, FormOrJson};

pub fn create_kendaraan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_kendaraan))
        .route("/store", post(create_kendaraan))
        .route("/kendaraan/:no_pol", put(update_kendaraan).delete(delete_kendaraan))
}

fn controller(state: &AppState) -> KendaraanController {
    KendaraanController::new(state.kendaraan.clone(), state.uploads.clone())
}

/// Body del create: multipart con imagen opcional, o JSON / urlencoded sin imagen.
///
/// Los archivos se filtran mientras se lee el multipart, antes de validar nada.
pub struct CreateKendaraanPayload {
    pub request: CreateKendaraanRequest,
    pub image: Option<UploadedImage>,
}

#[async_trait]
impl<S> FromRequest<S> for CreateKendaraanPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if BodyKind::of(&req) != BodyKind::Multipart {
            let FormOrJson(request) = FormOrJson::<CreateKendaraanRequest>::from_request(req, state).await?;
            return Ok(Self { request, image: None });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut request = CreateKendaraanRequest::default();
        let image = read_multipart(multipart, |name, value| request.set_field(name, value)).await?;

        Ok(Self { request, image })
    }
}

async fn list_kendaraan(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Kendaraan>>>> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn create_kendaraan(
    State(state): State<AppState>,
    payload: CreateKendaraanPayload,
) -> AppResult<(StatusCode, Json<ApiResponse<KendaraanCreatedResponse>>)> {
    let response = controller(&state)
        .create(payload.request, payload.image)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_kendaraan(
    State(state): State<AppState>,
    Path(no_pol): Path<String>,
    FormOrJson(request): FormOrJson<UpdateKendaraanRequest>,
) -> AppResult<Json<ApiResponse<KendaraanUpdatedResponse>>> {
    let response = controller(&state).update(no_pol, request).await?;
    Ok(Json(response))
}

async fn delete_kendaraan(
    State(state): State<AppState>,
    Path(no_pol): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let response = controller(&state).delete(&no_pol).await?;
    Ok(Json(response))
}
