//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    KendaraanRepository, PgKendaraanRepository, PgTransmisiRepository, TransmisiRepository,
};
use crate::services::ImageUploadService;

#[derive(Clone)]
pub struct AppState {
    pub transmisi: Arc<dyn TransmisiRepository>,
    pub kendaraan: Arc<dyn KendaraanRepository>,
    pub uploads: ImageUploadService,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Estado de producción: repositorios sobre PostgreSQL
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            transmisi: Arc::new(PgTransmisiRepository::new(pool.clone())),
            kendaraan: Arc::new(PgKendaraanRepository::new(pool)),
            uploads: ImageUploadService::new(config.upload_dir.clone()),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Estado con repositorios arbitrarios (memoria en tests)
    pub fn with_repositories(
        transmisi: Arc<dyn TransmisiRepository>,
        kendaraan: Arc<dyn KendaraanRepository>,
        uploads: ImageUploadService,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            transmisi,
            kendaraan,
            uploads,
            max_upload_bytes,
        }
    }
}
