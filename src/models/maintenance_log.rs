//! Modelo de MaintenanceLog
//!
//! Este módulo contiene el struct MaintenanceLog y su enum de tipo de servicio.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de mantenimiento - mapea al ENUM maintenance_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    OilChange,
    TireRotation,
    BrakeService,
    Inspection,
    Repair,
    BatteryReplacement,
    Other,
}

impl MaintenanceType {
    /// Etiqueta pt-PT que ve el usuario final
    pub fn label_pt(&self) -> &'static str {
        match self {
            MaintenanceType::OilChange => "Troca de Óleo",
            MaintenanceType::TireRotation => "Rotação de Pneus",
            MaintenanceType::BrakeService => "Serviço de Travões",
            MaintenanceType::Inspection => "Inspeção",
            MaintenanceType::Repair => "Reparação",
            MaintenanceType::BatteryReplacement => "Substituição de Bateria",
            MaintenanceType::Other => "Outro serviço",
        }
    }
}

/// Registro de mantenimiento - mapea exactamente a la tabla maintenance_logs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub cost: Option<Decimal>,
    pub odometer: f64,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_km: Option<f64>,
    pub service_provider: Option<String>,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtros para búsqueda de registros de mantenimiento
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceLogFilters {
    pub vehicle_id: Option<Uuid>,
}

impl MaintenanceLogFilters {
    /// Representación canónica para el checksum de caché
    pub fn cache_signature(&self) -> String {
        format!("vehicle={:?}", self.vehicle_id)
    }
}
