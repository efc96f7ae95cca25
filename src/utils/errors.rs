//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//!
//! Cada endpoint tiene su propio mensaje genérico para fallos de base de datos
//! ("server failed", "server error", "Server Error") y decide si adjunta el
//! error del driver; eso viaja dentro de `AppError::Database`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::database::DbError;
use crate::utils::validation::FieldError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}: {source}")]
    Database {
        message: &'static str,
        expose: bool,
        #[source]
        source: DbError,
    },

    /// Errores de validación. `status` y `key` varían por recurso:
    /// transmisi responde 422 con `error`, kendaraan 400 con `errors`.
    #[error("Validation error on {} field(s)", errors.len())]
    Validation {
        status: StatusCode,
        key: &'static str,
        errors: Vec<FieldError>,
    },

    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Archivo rechazado antes de llegar al handler
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Fallo de base de datos con mensaje genérico, sin detalles del driver
    pub fn database(message: &'static str, source: DbError) -> Self {
        AppError::Database {
            message,
            expose: false,
            source,
        }
    }

    /// Fallo de base de datos que adjunta el error del driver en `error`
    pub fn database_with_details(message: &'static str, source: DbError) -> Self {
        AppError::Database {
            message,
            expose: true,
            source,
        }
    }

    pub fn unprocessable(errors: Vec<FieldError>) -> Self {
        AppError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            key: "error",
            errors,
        }
    }

    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        AppError::Validation {
            status: StatusCode::BAD_REQUEST,
            key: "errors",
            errors,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database { .. } | AppError::Internal(_) | AppError::UploadRejected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation { status, .. } => *status,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Database {
                message,
                expose,
                source,
            } => {
                error!("❌ Database error ({}): {}", message, source);
                if expose {
                    json!({ "status": false, "message": message, "error": source.details() })
                } else {
                    json!({ "status": false, "message": message })
                }
            }

            AppError::Validation { key, errors, .. } => {
                warn!("⚠️ Validation error: {} campo(s) inválido(s)", errors.len());
                json!({ key: errors })
            }

            AppError::NotFound(message) => {
                warn!("🔍 Resource not found: {}", message);
                json!({ "status": false, "message": message })
            }

            AppError::UploadRejected(message) => {
                warn!("🚫 Upload rejected: {}", message);
                json!({ "status": false, "message": message })
            }

            AppError::BadRequest(message) => {
                warn!("⚠️ Bad request: {}", message);
                json!({ "status": false, "message": message })
            }

            AppError::Internal(message) => {
                error!("❌ Internal error: {}", message);
                json!({ "status": false, "message": "Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
