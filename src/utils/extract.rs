//! Extractores de body
//!
//! La API acepta tanto `application/json` como
//! `application/x-www-form-urlencoded`. Si la petición no trae ninguno de los
//! dos, el body se trata como vacío y la validación decide.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    UrlEncoded,
    Multipart,
    Other,
}

impl BodyKind {
    pub fn of(req: &Request) -> Self {
        let Some(content_type) = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        else {
            return BodyKind::Other;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            BodyKind::Json
        } else if mime == "application/x-www-form-urlencoded" {
            BodyKind::UrlEncoded
        } else if mime == "multipart/form-data" {
            BodyKind::Multipart
        } else {
            BodyKind::Other
        }
    }
}

/// Body decodificado desde JSON o formulario urlencoded
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(FormOrJson(value))
            }
            BodyKind::UrlEncoded => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(FormOrJson(value))
            }
            BodyKind::Multipart | BodyKind::Other => empty_body().map(FormOrJson),
        }
    }
}

/// Deserializar `T` como si el body fuera `{}`
pub fn empty_body<T: DeserializeOwned>() -> Result<T, AppError> {
    serde_json::from_value(Value::Object(Map::new()))
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
