use crate::cache::record_cache::ENTITY_FUEL_RECORDS;
use crate::cache::RecordCache;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::fuel_dto::{CreateFuelRecordRequest, FuelRecordResponse, UpdateFuelRecordRequest};
use crate::models::fuel_record::{FuelRecord, FuelRecordFilters};
use crate::repositories::fuel_record_repository::FuelRecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct FuelController {
    repository: FuelRecordRepository,
    vehicles: VehicleRepository,
    cache: RecordCache,
}

impl FuelController {
    pub fn new(pool: PgPool, cache: RecordCache) -> Self {
        Self {
            repository: FuelRecordRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateFuelRecordRequest,
    ) -> Result<ApiResponse<FuelRecordResponse>, AppError> {
        request.validate()?;

        // El vehículo debe pertenecer al usuario
        self.vehicles.find_owned(request.vehicle_id, user_id).await?;

        if request.quantity <= Decimal::ZERO {
            return Err(validation_error("quantity", "La cantidad debe ser positiva"));
        }
        if request.price_per_unit <= Decimal::ZERO {
            return Err(validation_error(
                "price_per_unit",
                "El precio unitario debe ser positivo",
            ));
        }
        if let Some(cost) = request.cost {
            if cost < Decimal::ZERO {
                return Err(validation_error("cost", "El coste no puede ser negativo"));
            }
        }
        if request.odometer < 0.0 {
            return Err(validation_error(
                "odometer",
                "El odómetro no puede ser negativo",
            ));
        }

        // Sin coste explícito se calcula de cantidad y precio
        let cost = request
            .cost
            .unwrap_or_else(|| (request.quantity * request.price_per_unit).round_dp(2));

        let record = FuelRecord {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            fuel_date: request.fuel_date,
            fuel_type: request.fuel_type,
            quantity: request.quantity,
            price_per_unit: request.price_per_unit,
            cost,
            odometer: request.odometer,
            is_full_tank: request.is_full_tank.unwrap_or(true),
            station_name: request.station_name,
            location: request.location,
            notes: request.notes,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&record).await?;
        self.cache.invalidate(user_id, ENTITY_FUEL_RECORDS).await;

        Ok(ApiResponse::success_with_message(
            FuelRecordResponse::from(saved),
            "Registro de combustible creado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        filters: FuelRecordFilters,
    ) -> Result<Vec<FuelRecordResponse>, AppError> {
        let signature = filters.cache_signature();

        if let Some(cached) = self
            .cache
            .get_list::<FuelRecord>(user_id, ENTITY_FUEL_RECORDS, &signature)
            .await
        {
            return Ok(cached.into_iter().map(FuelRecordResponse::from).collect());
        }

        let records = self.repository.find_filtered(user_id, &filters).await?;
        self.cache
            .store_list(user_id, ENTITY_FUEL_RECORDS, &signature, &records)
            .await;

        Ok(records.into_iter().map(FuelRecordResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateFuelRecordRequest,
    ) -> Result<ApiResponse<FuelRecordResponse>, AppError> {
        request.validate()?;

        let mut record = self.repository.find_owned(id, user_id).await?;

        if let Some(quantity) = request.quantity {
            if quantity <= Decimal::ZERO {
                return Err(validation_error("quantity", "La cantidad debe ser positiva"));
            }
            record.quantity = quantity;
        }
        if let Some(price_per_unit) = request.price_per_unit {
            if price_per_unit <= Decimal::ZERO {
                return Err(validation_error(
                    "price_per_unit",
                    "El precio unitario debe ser positivo",
                ));
            }
            record.price_per_unit = price_per_unit;
        }
        if let Some(cost) = request.cost {
            if cost < Decimal::ZERO {
                return Err(validation_error("cost", "El coste no puede ser negativo"));
            }
            // El coste es editable por sí solo, nunca se recalcula
            record.cost = cost;
        }
        if let Some(odometer) = request.odometer {
            if odometer < 0.0 {
                return Err(validation_error(
                    "odometer",
                    "El odómetro no puede ser negativo",
                ));
            }
            record.odometer = odometer;
        }
        if let Some(fuel_date) = request.fuel_date {
            record.fuel_date = fuel_date;
        }
        if let Some(fuel_type) = request.fuel_type {
            record.fuel_type = fuel_type;
        }
        if let Some(is_full_tank) = request.is_full_tank {
            record.is_full_tank = is_full_tank;
        }
        if request.station_name.is_some() {
            record.station_name = request.station_name;
        }
        if request.location.is_some() {
            record.location = request.location;
        }
        if request.notes.is_some() {
            record.notes = request.notes;
        }

        let updated = self.repository.update(&record).await?;
        self.cache.invalidate(user_id, ENTITY_FUEL_RECORDS).await;

        Ok(ApiResponse::success_with_message(
            FuelRecordResponse::from(updated),
            "Registro de combustible actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await?;
        self.cache.invalidate(user_id, ENTITY_FUEL_RECORDS).await;
        Ok(())
    }
}
