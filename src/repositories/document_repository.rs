use crate::models::document::{Document, DocumentFilters};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, document: &Document) -> Result<Document, AppError> {
        let created = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                id, vehicle_id, title, document_type, file_url, file_name,
                file_size, expiry_date, reminder_days_before, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(document.id)
        .bind(document.vehicle_id)
        .bind(&document.title)
        .bind(document.document_type)
        .bind(&document.file_url)
        .bind(&document.file_name)
        .bind(document.file_size)
        .bind(document.expiry_date)
        .bind(document.reminder_days_before)
        .bind(&document.notes)
        .bind(document.created_at)
        .bind(document.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    /// Documento verificando propiedad a través del vehículo
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Document, AppError> {
        let document = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        let owner = self.vehicle_owner(document.vehicle_id).await?;
        if owner != Some(user_id) {
            return Err(AppError::Forbidden(
                "Document does not belong to this user".to_string(),
            ));
        }

        Ok(document)
    }

    /// Documentos del usuario con filtros de vehículo, tipo y búsqueda
    /// por título o nombre de fichero
    pub async fn find_filtered(
        &self,
        user_id: Uuid,
        filters: &DocumentFilters,
    ) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT d.*
            FROM documents d
            JOIN vehicles v ON v.id = d.vehicle_id
            WHERE v.user_id = $1
              AND ($2::uuid IS NULL OR d.vehicle_id = $2)
              AND ($3::document_type IS NULL OR d.document_type = $3)
              AND ($4::text IS NULL
                   OR d.title ILIKE '%' || $4 || '%'
                   OR d.file_name ILIKE '%' || $4 || '%')
            ORDER BY d.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filters.vehicle_id)
        .bind(filters.document_type)
        .bind(&filters.search)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Actualización de metadatos; el fichero no cambia por aquí
    pub async fn update(&self, document: &Document) -> Result<Document, AppError> {
        let updated = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET title = $2, document_type = $3, expiry_date = $4,
                reminder_days_before = $5, notes = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(document.id)
        .bind(&document.title)
        .bind(document.document_type)
        .bind(document.expiry_date)
        .bind(document.reminder_days_before)
        .bind(&document.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.find_owned(id, user_id).await?;

        sqlx::query("DELETE FROM documents WHERE id = $1")
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
