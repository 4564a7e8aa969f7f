use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, user_id, brand, model, year, plate, vehicle_type, fuel_type,
                current_km, is_primary, tank_capacity, battery_capacity, vin,
                purchase_date, avatar_url, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.user_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.plate)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.fuel_type)
        .bind(vehicle.current_km)
        .bind(vehicle.is_primary)
        .bind(vehicle.tank_capacity)
        .bind(vehicle.battery_capacity)
        .bind(&vehicle.vin)
        .bind(vehicle.purchase_date)
        .bind(&vehicle.avatar_url)
        .bind(&vehicle.notes)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Vehículos del usuario, el principal primero
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY is_primary DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Vehículo verificando propiedad: NotFound si no existe,
    /// Forbidden si pertenece a otro usuario
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.user_id != user_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this user".to_string(),
            ));
        }

        Ok(vehicle)
    }

    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Vehículo principal del usuario; si no hay ninguno marcado,
    /// el más reciente
    pub async fn find_primary(&self, user_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE user_id = $1
            ORDER BY is_primary DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Verifica si la matrícula ya existe para el usuario,
    /// excluyendo opcionalmente un vehículo (para updates)
    pub async fn plate_exists(
        &self,
        user_id: Uuid,
        plate: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE user_id = $1 AND plate = $2 AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(user_id)
        .bind(plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Escribe todas las columnas del vehículo ya fusionado por el controller
    pub async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, plate = $5, vehicle_type = $6,
                fuel_type = $7, current_km = $8, tank_capacity = $9,
                battery_capacity = $10, vin = $11, purchase_date = $12,
                avatar_url = $13, notes = $14, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.plate)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.fuel_type)
        .bind(vehicle.current_km)
        .bind(vehicle.tank_capacity)
        .bind(vehicle.battery_capacity)
        .bind(&vehicle.vin)
        .bind(vehicle.purchase_date)
        .bind(&vehicle.avatar_url)
        .bind(&vehicle.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Marca un vehículo como principal desmarcando el resto,
    /// en una sola transacción
    pub async fn set_primary(&self, id: Uuid, user_id: Uuid) -> Result<Vehicle, AppError> {
        // Verificar propiedad antes de tocar nada
        self.find_owned(id, user_id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE vehicles SET is_primary = FALSE, updated_at = NOW() WHERE user_id = $1 AND is_primary")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET is_primary = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(vehicle)
    }

    /// Elimina el vehículo; los registros asociados caen en cascada
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.find_owned(id, user_id).await?;

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
