//! Vehicle Pulse Backend
//!
//! API REST para la gestión de gastos de vehículos personales:
//! repostajes, mantenimientos, documentos con ficheros adjuntos y
//! estadísticas de gasto, con autenticación JWT y cache Redis.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
