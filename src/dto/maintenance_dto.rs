use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance_log::{MaintenanceLog, MaintenanceType};

// Request para crear un registro de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceLogRequest {
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,
    pub maintenance_type: MaintenanceType,

    #[validate(length(min = 2, max = 500))]
    pub description: String,

    pub cost: Option<Decimal>,
    pub odometer: f64,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_km: Option<f64>,

    #[validate(length(max = 255))]
    pub service_provider: Option<String>,

    #[validate(length(max = 2048))]
    pub receipt_url: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar un registro de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceLogRequest {
    pub service_date: Option<NaiveDate>,
    pub maintenance_type: Option<MaintenanceType>,

    #[validate(length(min = 2, max = 500))]
    pub description: Option<String>,

    pub cost: Option<Decimal>,
    pub odometer: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_km: Option<f64>,

    #[validate(length(max = 255))]
    pub service_provider: Option<String>,

    #[validate(length(max = 2048))]
    pub receipt_url: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Response de registro de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceLogResponse {
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

impl From<MaintenanceLog> for MaintenanceLogResponse {
    fn from(log: MaintenanceLog) -> Self {
        Self {
            id: log.id,
            vehicle_id: log.vehicle_id,
            service_date: log.service_date,
            maintenance_type: log.maintenance_type,
            description: log.description,
            cost: log.cost,
            odometer: log.odometer,
            next_service_date: log.next_service_date,
            next_service_km: log.next_service_km,
            service_provider: log.service_provider,
            receipt_url: log.receipt_url,
            notes: log.notes,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}
