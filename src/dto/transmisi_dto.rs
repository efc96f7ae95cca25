use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{collect_field_errors, lenient_string, FieldError};

// Body de create y update de transmisi
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TransmisiRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(required, length(min = 1))]
    pub nama_transmisi: Option<String>,
}

impl TransmisiRequest {
    /// Validar y devolver el nombre, o la lista de errores por campo
    pub fn into_nama(self) -> Result<String, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(collect_field_errors(
                &errors,
                &[("nama_transmisi", self.nama_transmisi.as_deref())],
            ));
        }
        Ok(self.nama_transmisi.unwrap_or_default())
    }
}
