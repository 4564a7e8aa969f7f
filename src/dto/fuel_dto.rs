use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::fuel_record::FuelRecord;

// Request para crear un registro de combustible
//
// El campo cost es opcional: si no se envía, se calcula como
// quantity * price_per_unit (redondeado a 2 decimales).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFuelRecordRequest {
    pub vehicle_id: Uuid,
    pub fuel_date: NaiveDate,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: String,

    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub cost: Option<Decimal>,
    pub odometer: f64,
    pub is_full_tank: Option<bool>,

    #[validate(length(max = 255))]
    pub station_name: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar un registro de combustible
//
// cost se actualiza tal cual llega, sin recalcular: es editable
// independientemente de quantity y price_per_unit.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFuelRecordRequest {
    pub fuel_date: Option<NaiveDate>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    pub quantity: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub odometer: Option<f64>,
    pub is_full_tank: Option<bool>,

    #[validate(length(max = 255))]
    pub station_name: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Response de registro de combustible
#[derive(Debug, Serialize)]
pub struct FuelRecordResponse {
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

impl From<FuelRecord> for FuelRecordResponse {
    fn from(record: FuelRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            fuel_date: record.fuel_date,
            fuel_type: record.fuel_type,
            quantity: record.quantity,
            price_per_unit: record.price_per_unit,
            cost: record.cost,
            odometer: record.odometer,
            is_full_tank: record.is_full_tank,
            station_name: record.station_name,
            location: record.location,
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}
