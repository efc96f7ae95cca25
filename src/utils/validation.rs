//! Utilidades de validación
//!
//! Helpers compartidos por los DTOs: validadores custom para `validator`,
//! deserialización tolerante de campos del body y el formato de errores por
//! campo que devuelve la API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// Error de un campo del body, con la forma de express-validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub msg: String,
    pub path: &'static str,
    pub location: &'static str,
}

impl FieldError {
    pub fn new(path: &'static str, value: Option<&str>) -> Self {
        Self {
            kind: "field",
            value: value.map(str::to_string),
            msg: "Invalid value".to_string(),
            path,
            location: "body",
        }
    }
}

/// Aplanar `ValidationErrors` en una lista ordenada por la declaración de campos.
///
/// `validator` guarda los errores en un `HashMap`; el orden lo fija `fields`,
/// que además aporta el valor recibido para cada campo.
pub fn collect_field_errors(
    errors: &ValidationErrors,
    fields: &[(&'static str, Option<&str>)],
) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for &(path, value) in fields {
        if let Some(field_errors) = by_field.get(path) {
            for _ in field_errors.iter() {
                out.push(FieldError::new(path, value));
            }
        }
    }

    out
}

/// Validar que el valor sea un entero
pub fn validate_integer(value: &str) -> Result<(), ValidationError> {
    if value.parse::<i32>().is_err() {
        let mut error = ValidationError::new("integer");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Deserializar un campo opcional aceptando texto, números o booleanos.
///
/// Los clientes JSON suelen mandar `"id_transmisi": 2`; los formularios siempre
/// mandan texto. Ambos terminan como `Some(String)`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
