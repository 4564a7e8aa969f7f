//! Controllers
//!
//! Este módulo contiene la lógica de negocio entre rutas y repositorios:
//! validación de requests, reglas de propiedad y armado de responses.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod document_controller;
pub mod fuel_controller;
pub mod maintenance_controller;
pub mod stats_controller;
pub mod vehicle_controller;
