//! Servicio de subida de imágenes de kendaraan
//!
//! Un único archivo por petición bajo el campo `gambar_kendaraan`, solo `.png`.
//! El archivo se guarda en el directorio configurado con un nombre
//! `<campo>-<epoch ms>-<aleatorio><extensión original>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::Utc;
use rand::Rng;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::utils::errors::AppError;

pub const IMAGE_FIELD: &str = "gambar_kendaraan";

const ALLOWED_EXTENSIONS: &[&str] = &[".png"];
const REJECTED_FILE_TYPE: &str = "Jenis file tidak diizinkan";
const UNEXPECTED_FIELD: &str = "Unexpected field";
const MAX_NAME_ATTEMPTS: usize = 5;

/// Genera el nombre con el que se guarda un archivo subido
pub trait FilenameGenerator: Send + Sync {
    fn generate(&self, field_name: &str, extension: &str) -> String;
}

/// `gambar_kendaraan-1700000000000-123456789.png`
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampFilenameGenerator;

impl FilenameGenerator for TimestampFilenameGenerator {
    fn generate(&self, field_name: &str, extension: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
        format!("{}-{}-{}{}", field_name, millis, suffix, extension)
    }
}

/// Archivo recibido en el multipart, todavía en memoria
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub field_name: String,
    pub original_name: String,
    pub bytes: Bytes,
}

/// Extensión del nombre original (con punto, conservando mayúsculas).
///
/// Solo se aceptan las de `ALLOWED_EXTENSIONS`, comparando en minúsculas.
pub fn allowed_extension(original_name: &str) -> Result<String, AppError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
        Ok(extension)
    } else {
        Err(AppError::UploadRejected(REJECTED_FILE_TYPE.to_string()))
    }
}

/// Recorrer el multipart: los campos de texto van a `on_text`, el archivo se
/// valida al llegar y se devuelve.
///
/// Un archivo bajo otro campo, o un segundo archivo, rechaza la petición.
pub async fn read_multipart<F>(
    mut multipart: Multipart,
    mut on_text: F,
) -> Result<Option<UploadedImage>, AppError>
where
    F: FnMut(&str, String),
{
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            // Input de archivo vacío en formularios HTML
            Some(original_name) if original_name.is_empty() => {
                debug!("Campo de archivo '{}' vacío, se ignora", name);
            }
            Some(original_name) => {
                if name != IMAGE_FIELD || image.is_some() {
                    return Err(AppError::UploadRejected(UNEXPECTED_FIELD.to_string()));
                }
                allowed_extension(&original_name)?;

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                image = Some(UploadedImage {
                    field_name: name,
                    original_name,
                    bytes,
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                on_text(&name, value);
            }
        }
    }

    Ok(image)
}

#[derive(Clone)]
pub struct ImageUploadService {
    dir: PathBuf,
    generator: Arc<dyn FilenameGenerator>,
}

impl ImageUploadService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_generator(dir, Arc::new(TimestampFilenameGenerator))
    }

    pub fn with_generator(dir: impl Into<PathBuf>, generator: Arc<dyn FilenameGenerator>) -> Self {
        Self {
            dir: dir.into(),
            generator,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Guardar la imagen y devolver el nombre generado
    pub async fn store(&self, image: &UploadedImage) -> Result<String, AppError> {
        let extension = allowed_extension(&image.original_name)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("cannot create {}: {}", self.dir.display(), e)))?;

        // create_new nunca pisa un archivo existente; ante colisión se genera otro nombre
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = self.generator.generate(&image.field_name, &extension);
            let path = self.dir.join(&filename);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Nombre '{}' ya existe, generando otro", filename);
                    continue;
                }
                Err(e) => {
                    return Err(AppError::Internal(format!("cannot create {}: {}", path.display(), e)))
                }
            };

            file.write_all(&image.bytes)
                .await
                .map_err(|e| AppError::Internal(format!("cannot write {}: {}", path.display(), e)))?;
            file.flush()
                .await
                .map_err(|e| AppError::Internal(format!("cannot write {}: {}", path.display(), e)))?;

            info!("🖼️ Imagen guardada: {} ({} bytes)", filename, image.bytes.len());
            return Ok(filename);
        }

        Err(AppError::Internal(format!(
            "no free filename after {} attempts",
            MAX_NAME_ATTEMPTS
        )))
    }

    /// Borrar una imagen guardada (best effort)
    pub async fn remove(&self, filename: &str) {
        let path = self.dir.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("⚠️ No se pudo borrar {}: {}", path.display(), e);
        }
    }
}
