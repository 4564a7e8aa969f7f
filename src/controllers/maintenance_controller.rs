use crate::cache::record_cache::ENTITY_MAINTENANCE_LOGS;
use crate::cache::RecordCache;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceLogRequest, MaintenanceLogResponse, UpdateMaintenanceLogRequest,
};
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogFilters};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    vehicles: VehicleRepository,
    cache: RecordCache,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, cache: RecordCache) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateMaintenanceLogRequest,
    ) -> Result<ApiResponse<MaintenanceLogResponse>, AppError> {
        request.validate()?;

        // El vehículo debe pertenecer al usuario
        self.vehicles.find_owned(request.vehicle_id, user_id).await?;

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
        if let Some(next_km) = request.next_service_km {
            if next_km < 0.0 {
                return Err(validation_error(
                    "next_service_km",
                    "El kilometraje del próximo servicio no puede ser negativo",
                ));
            }
        }

        let now = Utc::now();
        let log = MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            service_date: request.service_date,
            maintenance_type: request.maintenance_type,
            description: request.description.trim().to_string(),
            cost: request.cost,
            odometer: request.odometer,
            next_service_date: request.next_service_date,
            next_service_km: request.next_service_km,
            service_provider: request.service_provider,
            receipt_url: request.receipt_url,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repository.create(&log).await?;
        self.cache.invalidate(user_id, ENTITY_MAINTENANCE_LOGS).await;

        Ok(ApiResponse::success_with_message(
            MaintenanceLogResponse::from(saved),
            "Registro de mantenimiento creado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        filters: MaintenanceLogFilters,
    ) -> Result<Vec<MaintenanceLogResponse>, AppError> {
        let signature = filters.cache_signature();

        if let Some(cached) = self
            .cache
            .get_list::<MaintenanceLog>(user_id, ENTITY_MAINTENANCE_LOGS, &signature)
            .await
        {
            return Ok(cached
                .into_iter()
                .map(MaintenanceLogResponse::from)
                .collect());
        }

        let logs = self.repository.find_filtered(user_id, &filters).await?;
        self.cache
            .store_list(user_id, ENTITY_MAINTENANCE_LOGS, &signature, &logs)
            .await;

        Ok(logs.into_iter().map(MaintenanceLogResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateMaintenanceLogRequest,
    ) -> Result<ApiResponse<MaintenanceLogResponse>, AppError> {
        request.validate()?;

        let mut log = self.repository.find_owned(id, user_id).await?;

        if let Some(cost) = request.cost {
            if cost < Decimal::ZERO {
                return Err(validation_error("cost", "El coste no puede ser negativo"));
            }
            log.cost = Some(cost);
        }
        if let Some(odometer) = request.odometer {
            if odometer < 0.0 {
                return Err(validation_error(
                    "odometer",
                    "El odómetro no puede ser negativo",
                ));
            }
            log.odometer = odometer;
        }
        if let Some(service_date) = request.service_date {
            log.service_date = service_date;
        }
        if let Some(maintenance_type) = request.maintenance_type {
            log.maintenance_type = maintenance_type;
        }
        if let Some(description) = request.description {
            log.description = description.trim().to_string();
        }
        if request.next_service_date.is_some() {
            log.next_service_date = request.next_service_date;
        }
        if let Some(next_km) = request.next_service_km {
            if next_km < 0.0 {
                return Err(validation_error(
                    "next_service_km",
                    "El kilometraje del próximo servicio no puede ser negativo",
                ));
            }
            log.next_service_km = Some(next_km);
        }
        if request.service_provider.is_some() {
            log.service_provider = request.service_provider;
        }
        if request.receipt_url.is_some() {
            log.receipt_url = request.receipt_url;
        }
        if request.notes.is_some() {
            log.notes = request.notes;
        }

        let updated = self.repository.update(&log).await?;
        self.cache.invalidate(user_id, ENTITY_MAINTENANCE_LOGS).await;

        Ok(ApiResponse::success_with_message(
            MaintenanceLogResponse::from(updated),
            "Registro de mantenimiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await?;
        self.cache.invalidate(user_id, ENTITY_MAINTENANCE_LOGS).await;
        Ok(())
    }
}
