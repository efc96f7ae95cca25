pub mod api_response;
pub mod kendaraan_dto;
pub mod transmisi_dto;

pub use api_response::ApiResponse;
