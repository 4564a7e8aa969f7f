use crate::cache::record_cache::{
    ENTITY_DOCUMENTS, ENTITY_FUEL_RECORDS, ENTITY_MAINTENANCE_LOGS, ENTITY_VEHICLES,
};
use crate::cache::RecordCache;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_plate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
    cache: RecordCache,
}

impl VehicleController {
    pub fn new(pool: PgPool, cache: RecordCache) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        // Matrícula normalizada y con formato válido
        let plate = request.plate.trim().to_uppercase();
        validate_plate(&plate).map_err(|_| validation_error("plate", "Matrícula inválida"))?;

        // Verificar que la matrícula no exista para este usuario
        if self.repository.plate_exists(user_id, &plate, None).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        // El primer vehículo del usuario queda como principal
        let is_first = self.repository.count_for_user(user_id).await? == 0;
        let wants_primary = request.is_primary.unwrap_or(false);

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id,
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            plate,
            vehicle_type: request.vehicle_type,
            fuel_type: request.fuel_type,
            current_km: request.current_km,
            is_primary: is_first,
            tank_capacity: request.tank_capacity,
            battery_capacity: request.battery_capacity,
            vin: request.vin,
            purchase_date: request.purchase_date,
            avatar_url: request.avatar_url,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let mut saved = self.repository.create(&vehicle).await?;

        // Promoción explícita a principal cuando ya había vehículos
        if wants_primary && !is_first {
            saved = self.repository.set_primary(saved.id, user_id).await?;
        }

        self.cache.invalidate(user_id, ENTITY_VEHICLES).await;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self.repository.find_owned(id, user_id).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let signature = "all";

        if let Some(cached) = self
            .cache
            .get_list::<Vehicle>(user_id, ENTITY_VEHICLES, signature)
            .await
        {
            return Ok(cached.into_iter().map(VehicleResponse::from).collect());
        }

        let vehicles = self.repository.find_by_user(user_id).await?;
        self.cache
            .store_list(user_id, ENTITY_VEHICLES, signature, &vehicles)
            .await;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let mut vehicle = self.repository.find_owned(id, user_id).await?;

        // Cambio de matrícula: normalizar y comprobar duplicados
        if let Some(plate) = request.plate {
            let plate = plate.trim().to_uppercase();
            validate_plate(&plate).map_err(|_| validation_error("plate", "Matrícula inválida"))?;

            if plate != vehicle.plate
                && self.repository.plate_exists(user_id, &plate, Some(id)).await?
            {
                return Err(AppError::Conflict(
                    "La matrícula ya está registrada".to_string(),
                ));
            }

            vehicle.plate = plate;
        }

        if let Some(brand) = request.brand {
            vehicle.brand = brand.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }
        if let Some(vehicle_type) = request.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(fuel_type) = request.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if request.current_km.is_some() {
            vehicle.current_km = request.current_km;
        }
        if request.tank_capacity.is_some() {
            vehicle.tank_capacity = request.tank_capacity;
        }
        if request.battery_capacity.is_some() {
            vehicle.battery_capacity = request.battery_capacity;
        }
        if request.vin.is_some() {
            vehicle.vin = request.vin;
        }
        if request.purchase_date.is_some() {
            vehicle.purchase_date = request.purchase_date;
        }
        if request.avatar_url.is_some() {
            vehicle.avatar_url = request.avatar_url;
        }
        if request.notes.is_some() {
            vehicle.notes = request.notes;
        }

        let updated = self.repository.update(&vehicle).await?;
        self.cache.invalidate(user_id, ENTITY_VEHICLES).await;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(updated),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn set_primary(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.repository.set_primary(id, user_id).await?;
        self.cache.invalidate(user_id, ENTITY_VEHICLES).await;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo marcado como principal".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await?;

        // Los registros asociados caen en cascada: invalidar todo
        self.cache.invalidate(user_id, ENTITY_VEHICLES).await;
        self.cache.invalidate(user_id, ENTITY_FUEL_RECORDS).await;
        self.cache.invalidate(user_id, ENTITY_MAINTENANCE_LOGS).await;
        self.cache.invalidate(user_id, ENTITY_DOCUMENTS).await;

        Ok(())
    }
}
