//! Análisis
//!
//! Este módulo contiene los cálculos puros de estadísticas y la línea
//! de tiempo de vencimientos. Ninguna función toca la base de datos.

pub mod stats_calculations;
pub mod timeline;
