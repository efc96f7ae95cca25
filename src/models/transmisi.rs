//! Modelo de Transmisi
//!
//! Mapea exactamente a la tabla `transmisi`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tipo de transmisión (manual, automática...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transmisi {
    pub id_transmisi: i32,
    pub nama_transmisi: String,
}
