use std::sync::Arc;

use tracing::info;

use crate::database::DbError;
use crate::dto::kendaraan_dto::{
    CreateKendaraanRequest, KendaraanCreatedResponse, KendaraanUpdatedResponse, UpdateKendaraanRequest,
};
use crate::dto::ApiResponse;
use crate::models::Kendaraan;
use crate::repositories::KendaraanRepository;
use crate::services::{ImageUploadService, UploadedImage};
use crate::utils::errors::{AppError, AppResult};

const SERVER_ERROR: &str = "Server Error";
const NOT_FOUND: &str = "Kendaraan tidak ditemukan";

pub struct KendaraanController {
    repository: Arc<dyn KendaraanRepository>,
    uploads: ImageUploadService,
}

impl KendaraanController {
    pub fn new(repository: Arc<dyn KendaraanRepository>, uploads: ImageUploadService) -> Self {
        Self { repository, uploads }
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<Kendaraan>>> {
        let rows = self
            .repository
            .find_all()
            .await
            .map_err(|e| AppError::database(SERVER_ERROR, e))?;

        Ok(ApiResponse::success(rows, "Daftar Kendaraan"))
    }

    pub async fn create(
        &self,
        request: CreateKendaraanRequest,
        image: Option<UploadedImage>,
    ) -> AppResult<ApiResponse<KendaraanCreatedResponse>> {
        // 400 (transmisi usa 422); se mantiene por compatibilidad con los clientes
        let mut new = request
            .into_new_kendaraan()
            .map_err(AppError::invalid_fields)?;

        if let Some(image) = &image {
            new.gambar_kendaraan = Some(self.uploads.store(image).await?);
        }

        let id = match self.repository.create(&new).await {
            Ok(id) => id,
            Err(e) => {
                if let Some(filename) = &new.gambar_kendaraan {
                    self.uploads.remove(filename).await;
                }
                return Err(AppError::database_with_details(SERVER_ERROR, e));
            }
        };

        info!("🚗 Kendaraan creado: {} ({})", new.no_pol, id);
        Ok(ApiResponse::success(
            KendaraanCreatedResponse {
                id,
                no_pol: new.no_pol,
                nama_kendaraan: new.nama_kendaraan,
                id_transmisi: new.id_transmisi,
                gambar_kendaraan: new.gambar_kendaraan,
            },
            "Kendaraan telah ditambahkan",
        ))
    }

    pub async fn update(
        &self,
        no_pol: String,
        request: UpdateKendaraanRequest,
    ) -> AppResult<ApiResponse<KendaraanUpdatedResponse>> {
        let affected = self
            .apply_update(&no_pol, &request)
            .await
            .map_err(|e| AppError::database(SERVER_ERROR, e))?;

        if affected == 0 {
            return Err(AppError::NotFound(NOT_FOUND));
        }

        info!("✏️ Kendaraan {} actualizado", no_pol);
        Ok(ApiResponse::success(
            KendaraanUpdatedResponse {
                no_pol,
                nama_kendaraan: request.nama_kendaraan,
                id_transmisi: request.id_transmisi,
            },
            "Kendaraan telah diupdate",
        ))
    }

    /// Sin validación de presencia. Un id_transmisi no entero solo lo rechaza la
    /// base de datos cuando la matrícula existe; si no, no hay filas afectadas.
    async fn apply_update(&self, no_pol: &str, request: &UpdateKendaraanRequest) -> Result<u64, DbError> {
        let id_transmisi = match request.parsed_id_transmisi() {
            Ok(id) => id,
            Err(raw) => {
                if !self.repository.exists(no_pol).await? {
                    return Ok(0);
                }
                return Err(DbError::InvalidInput(format!(
                    "'{}' is not a valid id_transmisi",
                    raw
                )));
            }
        };

        self.repository
            .update(no_pol, request.nama_kendaraan.as_deref(), id_transmisi)
            .await
    }

    pub async fn delete(&self, no_pol: &str) -> AppResult<ApiResponse<()>> {
        let affected = self
            .repository
            .delete(no_pol)
            .await
            .map_err(|e| AppError::database(SERVER_ERROR, e))?;

        if affected == 0 {
            return Err(AppError::NotFound(NOT_FOUND));
        }

        info!("🗑️ Kendaraan {} eliminado", no_pol);
        Ok(ApiResponse::message("Kendaraan telah dihapus"))
    }
}
