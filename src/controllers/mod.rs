pub mod kendaraan_controller;
pub mod transmisi_controller;
