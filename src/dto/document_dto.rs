use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::document::{Document, DocumentType};

// Request para subir un documento
//
// file_data lleva el contenido en base64 (se acepta también una data URL
// completa, p.ej. "data:application/pdf;base64,...").
#[derive(Debug, Deserialize, Validate)]
pub struct UploadDocumentRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub document_type: DocumentType,

    #[validate(length(min = 1, max = 255))]
    pub file_name: String,

    #[validate(length(min = 1))]
    pub file_data: String,

    pub expiry_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 365))]
    pub reminder_days_before: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar los metadatos de un documento
//
// El fichero en sí no se reemplaza: para cambiarlo se elimina el
// documento y se sube de nuevo.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub document_type: Option<DocumentType>,

    pub expiry_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 365))]
    pub reminder_days_before: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Response de documento
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub document_type: DocumentType,
    pub file_url: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub reminder_days_before: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            vehicle_id: document.vehicle_id,
            title: document.title,
            document_type: document.document_type,
            file_url: document.file_url,
            file_name: document.file_name,
            file_size: document.file_size,
            expiry_date: document.expiry_date,
            reminder_days_before: document.reminder_days_before,
            notes: document.notes,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}
