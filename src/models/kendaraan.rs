//! Modelo de Kendaraan
//!
//! Mapea exactamente a la tabla `kendaraan`. `no_pol` es la clave natural usada
//! por update y delete; `id_kendaraan` la genera la base de datos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Kendaraan {
    pub id_kendaraan: i32,
    pub no_pol: String,
    pub nama_kendaraan: String,
    pub id_transmisi: i32,
    pub gambar_kendaraan: Option<String>,
}

/// Datos de un vehículo antes de insertarlo
#[derive(Debug, Clone, PartialEq)]
pub struct NewKendaraan {
    pub no_pol: String,
    pub nama_kendaraan: String,
    pub id_transmisi: i32,
    pub gambar_kendaraan: Option<String>,
}

impl NewKendaraan {
    pub fn into_kendaraan(self, id_kendaraan: i32) -> Kendaraan {
        Kendaraan {
            id_kendaraan,
            no_pol: self.no_pol,
            nama_kendaraan: self.nama_kendaraan,
            id_transmisi: self.id_transmisi,
            gambar_kendaraan: self.gambar_kendaraan,
        }
    }
}
