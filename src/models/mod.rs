//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod document;
pub mod fuel_record;
pub mod maintenance_log;
pub mod profile;
pub mod vehicle;
