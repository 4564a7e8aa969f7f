use crate::cache::record_cache::ENTITY_DOCUMENTS;
use crate::cache::RecordCache;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::document_dto::{DocumentResponse, UpdateDocumentRequest, UploadDocumentRequest};
use crate::models::document::{Document, DocumentFilters};
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::StorageService;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

pub struct DocumentController {
    repository: DocumentRepository,
    vehicles: VehicleRepository,
    storage: StorageService,
    cache: RecordCache,
}

impl DocumentController {
    pub fn new(pool: PgPool, cache: RecordCache, storage: StorageService) -> Self {
        Self {
            repository: DocumentRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            storage,
            cache,
        }
    }

    pub async fn upload(
        &self,
        user_id: Uuid,
        request: UploadDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        request.validate()?;

        // El vehículo debe pertenecer al usuario
        self.vehicles.find_owned(request.vehicle_id, user_id).await?;

        let stored = self
            .storage
            .save(user_id, request.vehicle_id, &request.file_name, &request.file_data)
            .await?;

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            title: request.title.trim().to_string(),
            document_type: request.document_type,
            file_url: stored.public_url,
            file_name: stored.file_name,
            file_size: Some(stored.size),
            expiry_date: request.expiry_date,
            reminder_days_before: request.reminder_days_before,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        // Si la fila no se puede insertar, el fichero huérfano se borra
        let saved = match self.repository.create(&document).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("❌ Error guardando documento, limpiando fichero: {}", e);
                self.storage.delete_by_url(&document.file_url).await;
                return Err(e);
            }
        };

        self.cache.invalidate(user_id, ENTITY_DOCUMENTS).await;

        Ok(ApiResponse::success_with_message(
            DocumentResponse::from(saved),
            "Documento subido exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<DocumentResponse, AppError> {
        let document = self.repository.find_owned(id, user_id).await?;
        Ok(DocumentResponse::from(document))
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        filters: DocumentFilters,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let signature = filters.cache_signature();

        if let Some(cached) = self
            .cache
            .get_list::<Document>(user_id, ENTITY_DOCUMENTS, &signature)
            .await
        {
            return Ok(cached.into_iter().map(DocumentResponse::from).collect());
        }

        let documents = self.repository.find_filtered(user_id, &filters).await?;
        self.cache
            .store_list(user_id, ENTITY_DOCUMENTS, &signature, &documents)
            .await;

        Ok(documents.into_iter().map(DocumentResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        request.validate()?;

        let mut document = self.repository.find_owned(id, user_id).await?;

        if let Some(title) = request.title {
            document.title = title.trim().to_string();
        }
        if let Some(document_type) = request.document_type {
            document.document_type = document_type;
        }
        if request.expiry_date.is_some() {
            document.expiry_date = request.expiry_date;
        }
        if request.reminder_days_before.is_some() {
            document.reminder_days_before = request.reminder_days_before;
        }
        if request.notes.is_some() {
            document.notes = request.notes;
        }

        let updated = self.repository.update(&document).await?;
        self.cache.invalidate(user_id, ENTITY_DOCUMENTS).await;

        Ok(ApiResponse::success_with_message(
            DocumentResponse::from(updated),
            "Documento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        // Se busca primero para conocer la URL del fichero en disco
        let document = self.repository.find_owned(id, user_id).await?;

        self.repository.delete(id, user_id).await?;
        self.storage.delete_by_url(&document.file_url).await;
        self.cache.invalidate(user_id, ENTITY_DOCUMENTS).await;

        Ok(())
    }
}
