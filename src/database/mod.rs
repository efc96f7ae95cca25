//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL y el tipo de error común de los repositorios

pub mod connection;
pub mod error;

pub use connection::DatabaseConnection;
pub use error::{parse_id, DbError, DbErrorDetails};
