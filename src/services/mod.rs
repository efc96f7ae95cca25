//! Servicios del sistema
//!
//! Lógica que no es acceso a datos: por ahora la subida de imágenes.

pub mod upload_service;

pub use upload_service::{FilenameGenerator, ImageUploadService, TimestampFilenameGenerator, UploadedImage};
