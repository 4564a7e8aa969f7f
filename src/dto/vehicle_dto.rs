use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{FuelType, Vehicle, VehicleType};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 4, max = 20))]
    pub plate: String,

    pub vehicle_type: VehicleType,
    pub fuel_type: FuelType,

    pub current_km: Option<f64>,
    pub tank_capacity: Option<f64>,
    pub battery_capacity: Option<f64>,

    #[validate(length(max = 50))]
    pub vin: Option<String>,

    pub purchase_date: Option<NaiveDate>,
    pub is_primary: Option<bool>,

    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 4, max = 20))]
    pub plate: Option<String>,

    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: Option<FuelType>,

    pub current_km: Option<f64>,
    pub tank_capacity: Option<f64>,
    pub battery_capacity: Option<f64>,

    #[validate(length(max = 50))]
    pub vin: Option<String>,

    pub purchase_date: Option<NaiveDate>,

    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub fuel_type: FuelType,
    pub current_km: Option<f64>,
    pub is_primary: bool,
    pub tank_capacity: Option<f64>,
    pub battery_capacity: Option<f64>,
    pub vin: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            plate: vehicle.plate,
            vehicle_type: vehicle.vehicle_type,
            fuel_type: vehicle.fuel_type,
            current_km: vehicle.current_km,
            is_primary: vehicle.is_primary,
            tank_capacity: vehicle.tank_capacity,
            battery_capacity: vehicle.battery_capacity,
            vin: vehicle.vin,
            purchase_date: vehicle.purchase_date,
            avatar_url: vehicle.avatar_url,
            notes: vehicle.notes,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
