//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y formato de valores pt-PT.

pub mod errors;
pub mod format;
pub mod jwt;
pub mod validation;
