use crate::models::fuel_record::{FuelRecord, FuelRecordFilters};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FuelRecordRepository {
    pool: PgPool,
}

impl FuelRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &FuelRecord) -> Result<FuelRecord, AppError> {
        let created = sqlx::query_as::<_, FuelRecord>(
            r#"
            INSERT INTO fuel_records (
                id, vehicle_id, fuel_date, fuel_type, quantity, price_per_unit,
                cost, odometer, is_full_tank, station_name, location, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.fuel_date)
        .bind(&record.fuel_type)
        .bind(record.quantity)
        .bind(record.price_per_unit)
        .bind(record.cost)
        .bind(record.odometer)
        .bind(record.is_full_tank)
        .bind(&record.station_name)
        .bind(&record.location)
        .bind(&record.notes)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FuelRecord>, AppError> {
        let record = sqlx::query_as::<_, FuelRecord>("SELECT * FROM fuel_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Registro verificando propiedad a través del vehículo
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<FuelRecord, AppError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fuel record not found".to_string()))?;

        let owner = self.vehicle_owner(record.vehicle_id).await?;
        if owner != Some(user_id) {
            return Err(AppError::Forbidden(
                "Fuel record does not belong to this user".to_string(),
            ));
        }

        Ok(record)
    }

    /// Registros del usuario, con filtros opcionales de vehículo y rango
    /// de fechas. El scoping por usuario va en el JOIN con vehicles.
    pub async fn find_filtered(
        &self,
        user_id: Uuid,
        filters: &FuelRecordFilters,
    ) -> Result<Vec<FuelRecord>, AppError> {
        let records = sqlx::query_as::<_, FuelRecord>(
            r#"
            SELECT fr.*
            FROM fuel_records fr
            JOIN vehicles v ON v.id = fr.vehicle_id
            WHERE v.user_id = $1
              AND ($2::uuid IS NULL OR fr.vehicle_id = $2)
              AND ($3::date IS NULL OR fr.fuel_date >= $3)
              AND ($4::date IS NULL OR fr.fuel_date <= $4)
            ORDER BY fr.fuel_date DESC, fr.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filters.vehicle_id)
        .bind(filters.start_date)
        .bind(filters.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Escribe todas las columnas del registro ya fusionado por el controller
    pub async fn update(&self, record: &FuelRecord) -> Result<FuelRecord, AppError> {
        let updated = sqlx::query_as::<_, FuelRecord>(
            r#"
            UPDATE fuel_records
            SET fuel_date = $2, fuel_type = $3, quantity = $4, price_per_unit = $5,
                cost = $6, odometer = $7, is_full_tank = $8, station_name = $9,
                location = $10, notes = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.fuel_date)
        .bind(&record.fuel_type)
        .bind(record.quantity)
        .bind(record.price_per_unit)
        .bind(record.cost)
        .bind(record.odometer)
        .bind(record.is_full_tank)
        .bind(&record.station_name)
        .bind(&record.location)
        .bind(&record.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.find_owned(id, user_id).await?;

        sqlx::query("DELETE FROM fuel_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn vehicle_owner(&self, vehicle_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.0))
    }
}
