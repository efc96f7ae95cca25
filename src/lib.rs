//! API REST de transmisi y kendaraan
//!
//! Router Axum sobre PostgreSQL: CRUD de tipos de transmisión y de vehículos,
//! con subida de una imagen `.png` por vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
