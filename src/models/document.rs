//! Modelo de Document
//!
//! Este módulo contiene el struct Document y su enum de tipo de documento.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de documento - mapea al ENUM document_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Insurance,
    Registration,
    Inspection,
    Invoice,
    Warranty,
    Other,
}

impl DocumentType {
    /// Etiqueta pt-PT que ve el usuario final
    pub fn label_pt(&self) -> &'static str {
        match self {
            DocumentType::Insurance => "Seguro",
            DocumentType::Registration => "Registo",
            DocumentType::Inspection => "Inspeção",
            DocumentType::Invoice => "Fatura",
            DocumentType::Warranty => "Garantia",
            DocumentType::Other => "Outro documento",
        }
    }
}

/// Documento de vehículo - mapea exactamente a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
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

/// Filtros para búsqueda de documentos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentFilters {
    pub vehicle_id: Option<Uuid>,
    pub document_type: Option<DocumentType>,
    pub search: Option<String>,
}

impl DocumentFilters {
    /// Representación canónica para el checksum de caché
    pub fn cache_signature(&self) -> String {
        format!(
            "vehicle={:?}|type={:?}|search={:?}",
            self.vehicle_id, self.document_type, self.search
        )
    }
}
