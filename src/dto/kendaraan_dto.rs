use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::NewKendaraan;
use crate::utils::validation::{collect_field_errors, lenient_string, validate_integer, FieldError};

// Campos de texto del create (multipart, urlencoded o JSON)
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct CreateKendaraanRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(required, length(min = 1))]
    pub no_pol: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(required, length(min = 1))]
    pub nama_kendaraan: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(required, length(min = 1), custom = "validate_integer")]
    pub id_transmisi: Option<String>,
}

impl CreateKendaraanRequest {
    /// Asignar un campo de texto recibido en el multipart
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "no_pol" => self.no_pol = Some(value),
            "nama_kendaraan" => self.nama_kendaraan = Some(value),
            "id_transmisi" => self.id_transmisi = Some(value),
            _ => {}
        }
    }

    /// Validar y convertir en la fila a insertar (sin imagen todavía)
    pub fn into_new_kendaraan(self) -> Result<NewKendaraan, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(collect_field_errors(
                &errors,
                &[
                    ("no_pol", self.no_pol.as_deref()),
                    ("nama_kendaraan", self.nama_kendaraan.as_deref()),
                    ("id_transmisi", self.id_transmisi.as_deref()),
                ],
            ));
        }

        let id_transmisi = self
            .id_transmisi
            .as_deref()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or_default();

        Ok(NewKendaraan {
            no_pol: self.no_pol.unwrap_or_default(),
            nama_kendaraan: self.nama_kendaraan.unwrap_or_default(),
            id_transmisi,
            gambar_kendaraan: None,
        })
    }
}

// Body del update: sin validación de presencia.
// `id_transmisi` se guarda tal cual llegó para devolverlo en el eco.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateKendaraanRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub nama_kendaraan: Option<String>,
    #[serde(default)]
    pub id_transmisi: Option<Value>,
}

impl UpdateKendaraanRequest {
    /// `id_transmisi` como entero; `Err` con el valor recibido si no lo es
    pub fn parsed_id_transmisi(&self) -> Result<Option<i32>, String> {
        match &self.id_transmisi {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => s.parse::<i32>().map(Some).map_err(|_| s.clone()),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| n.to_string()),
            Some(other) => Err(other.to_string()),
        }
    }
}

// Response del create
#[derive(Debug, Serialize)]
pub struct KendaraanCreatedResponse {
    pub id: i32,
    pub no_pol: String,
    pub nama_kendaraan: String,
    pub id_transmisi: i32,
    pub gambar_kendaraan: Option<String>,
}

// Response del update: eco de los campos recibidos
#[derive(Debug, Serialize)]
pub struct KendaraanUpdatedResponse {
    pub no_pol: String,
    pub nama_kendaraan: Option<String>,
    pub id_transmisi: Option<Value>,
}
