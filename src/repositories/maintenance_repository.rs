use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogFilters};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, log: &MaintenanceLog) -> Result<MaintenanceLog, AppError> {
        let created = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (
                id, vehicle_id, service_date, maintenance_type, description, cost,
                odometer, next_service_date, next_service_km, service_provider,
                receipt_url, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.vehicle_id)
        .bind(log.service_date)
        .bind(log.maintenance_type)
        .bind(&log.description)
        .bind(log.cost)
        .bind(log.odometer)
        .bind(log.next_service_date)
        .bind(log.next_service_km)
        .bind(&log.service_provider)
        .bind(&log.receipt_url)
        .bind(&log.notes)
        .bind(log.created_at)
        .bind(log.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceLog>, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    /// Registro verificando propiedad a través del vehículo
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<MaintenanceLog, AppError> {
        let log = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance log not found".to_string()))?;

        let owner = self.vehicle_owner(log.vehicle_id).await?;
        if owner != Some(user_id) {
            return Err(AppError::Forbidden(
                "Maintenance log does not belong to this user".to_string(),
            ));
        }

        Ok(log)
    }

    /// Registros del usuario, opcionalmente de un solo vehículo
    pub async fn find_filtered(
        &self,
        user_id: Uuid,
        filters: &MaintenanceLogFilters,
    ) -> Result<Vec<MaintenanceLog>, AppError> {
        let logs = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            SELECT ml.*
            FROM maintenance_logs ml
            JOIN vehicles v ON v.id = ml.vehicle_id
            WHERE v.user_id = $1
              AND ($2::uuid IS NULL OR ml.vehicle_id = $2)
            ORDER BY ml.service_date DESC, ml.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filters.vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Escribe todas las columnas del registro ya fusionado por el controller
    pub async fn update(&self, log: &MaintenanceLog) -> Result<MaintenanceLog, AppError> {
        let updated = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            UPDATE maintenance_logs
            SET service_date = $2, maintenance_type = $3, description = $4, cost = $5,
                odometer = $6, next_service_date = $7, next_service_km = $8,
                service_provider = $9, receipt_url = $10, notes = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.service_date)
        .bind(log.maintenance_type)
        .bind(&log.description)
        .bind(log.cost)
        .bind(log.odometer)
        .bind(log.next_service_date)
        .bind(log.next_service_km)
        .bind(&log.service_provider)
        .bind(&log.receipt_url)
        .bind(&log.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.find_owned(id, user_id).await?;

        sqlx::query("DELETE FROM maintenance_logs WHERE id = $1")
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
