//! Repositorios
//!
//! Cada recurso expone un trait de acceso a datos; los handlers reciben la
//! implementación por `AppState` (PostgreSQL en producción, memoria en tests).

pub mod kendaraan_repository;
pub mod memory;
pub mod transmisi_repository;

pub use kendaraan_repository::{KendaraanRepository, PgKendaraanRepository};
pub use memory::{InMemoryKendaraanRepository, InMemoryTransmisiRepository};
pub use transmisi_repository::{PgTransmisiRepository, TransmisiRepository};
