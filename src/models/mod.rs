//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL.

pub mod kendaraan;
pub mod transmisi;

pub use kendaraan::{Kendaraan, NewKendaraan};
pub use transmisi::Transmisi;
