//! DTOs de la API
//!
//! Requests con validación, responses y la envoltura ApiResponse.

pub mod auth_dto;
pub mod document_dto;
pub mod fuel_dto;
pub mod maintenance_dto;
pub mod stats_dto;
pub mod vehicle_dto;
