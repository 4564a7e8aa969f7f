//! Modelo de FuelRecord
//!
//! Este módulo contiene el struct FuelRecord y sus filtros de búsqueda.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registro de combustible - mapea exactamente a la tabla fuel_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FuelRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub fuel_date: NaiveDate,
    pub fuel_type: String,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub cost: Decimal,
    pub odometer: f64,
    pub is_full_tank: bool,
    pub station_name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filtros para búsqueda de registros de combustible
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuelRecordFilters {
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FuelRecordFilters {
    /// Representación canónica para el checksum de caché
    pub fn cache_signature(&self) -> String {
        format!(
            "vehicle={:?}|start={:?}|end={:?}",
            self.vehicle_id, self.start_date, self.end_date
        )
    }
}
