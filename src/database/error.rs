//! Errores de la capa de persistencia
//!
//! Los repositorios devuelven `DbError` sin importar el backend (PostgreSQL o
//! memoria), así los handlers lo convierten siempre igual en un 500.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// Valor que la base de datos rechazaría (id no numérico, entero fuera de rango...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database unavailable: {0}")]
    Unavailable(String),
}

/// Representación JSON del error del driver que algunos endpoints adjuntan
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbErrorDetails {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DbError {
    pub fn details(&self) -> DbErrorDetails {
        match self {
            DbError::Sqlx(sqlx::Error::Database(db)) => DbErrorDetails {
                kind: "database",
                message: db.message().to_string(),
                code: db.code().map(|c| c.into_owned()),
            },
            DbError::Sqlx(e) => DbErrorDetails {
                kind: "driver",
                message: e.to_string(),
                code: None,
            },
            DbError::InvalidInput(msg) => DbErrorDetails {
                kind: "invalid_input",
                message: msg.clone(),
                code: None,
            },
            DbError::Unavailable(msg) => DbErrorDetails {
                kind: "unavailable",
                message: msg.clone(),
                code: None,
            },
        }
    }
}

/// Convertir un parámetro de ruta en id entero, como lo haría la base de datos
pub fn parse_id(raw: &str) -> Result<i32, DbError> {
    raw.parse::<i32>()
        .map_err(|_| DbError::InvalidInput(format!("'{}' is not a valid integer id", raw)))
}
