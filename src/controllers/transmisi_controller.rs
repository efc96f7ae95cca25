use std::sync::Arc;

use tracing::info;

use crate::database::parse_id;
use crate::dto::transmisi_dto::TransmisiRequest;
use crate::dto::ApiResponse;
use crate::models::Transmisi;
use crate::repositories::TransmisiRepository;
use crate::utils::errors::{AppError, AppResult};

const SERVER_FAILED: &str = "server failed";
const SERVER_ERROR: &str = "server error";

pub struct TransmisiController {
    repository: Arc<dyn TransmisiRepository>,
}

impl TransmisiController {
    pub fn new(repository: Arc<dyn TransmisiRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<Transmisi>>> {
        let rows = self
            .repository
            .find_all()
            .await
            .map_err(|e| AppError::database_with_details(SERVER_FAILED, e))?;

        Ok(ApiResponse::success(rows, "Data transmisi"))
    }

    pub async fn get_by_id(&self, raw_id: &str) -> AppResult<ApiResponse<Transmisi>> {
        let row = async {
            let id = parse_id(raw_id)?;
            self.repository.find_by_id(id).await
        }
        .await
        .map_err(|e| AppError::database_with_details(SERVER_ERROR, e))?
        .ok_or(AppError::NotFound("Not Found"))?;

        Ok(ApiResponse::success(row, "data transmisi"))
    }

    pub async fn create(&self, request: TransmisiRequest) -> AppResult<ApiResponse<Transmisi>> {
        // 422 aquí, mientras que kendaraan responde 400 a lo mismo; los clientes existentes dependen de ambos
        let nama = request.into_nama().map_err(AppError::unprocessable)?;

        let row = self
            .repository
            .create(&nama)
            .await
            .map_err(|e| AppError::database(SERVER_FAILED, e))?;

        info!("➕ Transmisi creada: {} ({})", row.id_transmisi, row.nama_transmisi);
        Ok(ApiResponse::success(row, "Success"))
    }

    /// Responde "update" aunque el id no exista: no hay comprobación de existencia
    pub async fn update(&self, raw_id: &str, request: TransmisiRequest) -> AppResult<ApiResponse<()>> {
        let nama = request.into_nama().map_err(AppError::unprocessable)?;

        let affected = async {
            let id = parse_id(raw_id)?;
            self.repository.update(id, &nama).await
        }
        .await
        .map_err(|e| AppError::database(SERVER_ERROR, e))?;

        info!("✏️ Transmisi {} actualizada ({} fila(s))", raw_id, affected);
        Ok(ApiResponse::message("update"))
    }

    /// Igual que update, responde 200 aunque no se borre nada
    pub async fn delete(&self, raw_id: &str) -> AppResult<ApiResponse<()>> {
        let affected = async {
            let id = parse_id(raw_id)?;
            self.repository.delete(id).await
        }
        .await
        .map_err(|e| AppError::database(SERVER_ERROR, e))?;

        info!("🗑️ Transmisi {} eliminada ({} fila(s))", raw_id, affected);
        Ok(ApiResponse::message("Data di hapus"))
    }
}
