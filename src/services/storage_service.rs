//! Servicio de almacenamiento de ficheros
//!
//! Guarda los ficheros subidos (en base64) bajo el árbol local
//! `{storage_root}/{user_id}/{vehicle_id}/` y construye las URLs
//! públicas que sirve el endpoint /files.

use std::path::{Component, Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Fichero ya persistido en disco
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Nombre final en disco (con prefijo de timestamp)
    pub file_name: String,
    /// Ruta relativa al storage_root
    pub relative_path: String,
    /// URL pública servida por /files
    pub public_url: String,
    pub size: i64,
}

pub struct StorageService {
    root: PathBuf,
    public_base_url: String,
    max_upload_bytes: usize,
}

impl StorageService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            root: PathBuf::from(&config.storage_root),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Decodifica el payload base64, aceptando también data URLs
    /// ("data:application/pdf;base64,....")
    pub fn decode_payload(&self, file_data: &str) -> Result<Vec<u8>, AppError> {
        let payload = match file_data.split_once("base64,") {
            Some((_, rest)) => rest,
            None => file_data,
        };

        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

        let bytes = STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|_| AppError::BadRequest("Invalid base64 file payload".to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("File payload is empty".to_string()));
        }

        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the maximum allowed size of {} bytes",
                self.max_upload_bytes
            )));
        }

        Ok(bytes)
    }

    /// Guarda el fichero bajo {root}/{user_id}/{vehicle_id}/{timestamp}_{nombre}
    pub async fn save(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        file_name: &str,
        file_data: &str,
    ) -> Result<StoredFile, AppError> {
        let bytes = self.decode_payload(file_data)?;

        let stored_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        let relative_path = format!("{}/{}/{}", user_id, vehicle_id, stored_name);

        let directory = self.root.join(user_id.to_string()).join(vehicle_id.to_string());
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot create storage directory: {}", e)))?;

        let full_path = directory.join(&stored_name);
        let size = bytes.len() as i64;
        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot write file: {}", e)))?;

        debug!("💾 Fichero guardado en {:?} ({} bytes)", full_path, size);

        let public_url = format!(
            "{}/files/{}/{}/{}",
            self.public_base_url,
            user_id,
            vehicle_id,
            urlencoding::encode(&stored_name)
        );

        Ok(StoredFile {
            file_name: stored_name,
            relative_path,
            public_url,
            size,
        })
    }

    /// Borra el fichero apuntado por una URL pública. Best effort: un
    /// fallo solo se registra, nunca bloquea la operación del llamante.
    pub async fn delete_by_url(&self, file_url: &str) {
        let Some(relative_path) = self.relative_path_from_url(file_url) else {
            warn!("⚠️ URL de fichero no reconocida, no se borra: {}", file_url);
            return;
        };

        let full_path = match self.resolve(&relative_path) {
            Ok(path) => path,
            Err(_) => {
                warn!("⚠️ Ruta de fichero inválida, no se borra: {}", relative_path);
                return;
            }
        };

        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => debug!("🗑️ Fichero eliminado: {:?}", full_path),
            Err(e) => warn!("⚠️ No se pudo eliminar {:?}: {}", full_path, e),
        }
    }

    /// Los tres últimos segmentos de la URL son user_id/vehicle_id/nombre
    fn relative_path_from_url(&self, file_url: &str) -> Option<String> {
        let segments: Vec<&str> = file_url.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return None;
        }

        let tail = &segments[segments.len() - 3..];
        let decoded: Vec<String> = tail
            .iter()
            .map(|s| urlencoding::decode(s).map(|d| d.into_owned()))
            .collect::<Result<_, _>>()
            .ok()?;

        Some(decoded.join("/"))
    }

    /// Resuelve una ruta relativa bajo el root rechazando traversal
    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(relative_path);

        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative_path.is_empty() {
            return Err(AppError::BadRequest("Invalid file path".to_string()));
        }

        Ok(self.root.join(relative))
    }
}

/// Limpia el nombre de fichero: solo alfanuméricos, punto, guion y
/// guion bajo; sin puntos al inicio
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "fichero".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Content-Type según la extensión del fichero
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "txt" => "text/plain; charset=utf-8",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(root: &Path) -> EnvironmentConfig {
        EnvironmentConfig {
            storage_root: root.to_string_lossy().to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            max_upload_bytes: 1024,
            ..EnvironmentConfig::default()
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("seguro 2025.pdf"), "seguro_2025.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("...."), "fichero");
        assert_eq!(sanitize_file_name("fatura-março.pdf"), "fatura-mar_o.pdf");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("seguro.pdf"), "application/pdf");
        assert_eq!(content_type_for("foto.JPG"), "image/jpeg");
        assert_eq!(content_type_for("sin_extension"), "application/octet-stream");
    }

    #[test]
    fn test_decode_payload_accepts_data_url() {
        let service = StorageService::new(&test_config(Path::new("/tmp")));

        // "hola" en base64
        let plain = service.decode_payload("aG9sYQ==").unwrap();
        assert_eq!(plain, b"hola");

        let data_url = service
            .decode_payload("data:text/plain;base64,aG9sYQ==")
            .unwrap();
        assert_eq!(data_url, b"hola");
    }

    #[test]
    fn test_decode_payload_rejects_garbage_and_oversize() {
        let service = StorageService::new(&test_config(Path::new("/tmp")));

        assert!(service.decode_payload("esto no es base64 !!!").is_err());

        // 2048 bytes codificados superan el límite de 1024
        let oversized = STANDARD.encode(vec![0u8; 2048]);
        assert!(service.decode_payload(&oversized).is_err());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let service = StorageService::new(&test_config(Path::new("/tmp/storage")));

        assert!(service.resolve("user/vehicle/fichero.pdf").is_ok());
        assert!(service.resolve("../fichero.pdf").is_err());
        assert!(service.resolve("user/../../fichero.pdf").is_err());
        assert!(service.resolve("/etc/passwd").is_err());
        assert!(service.resolve("").is_err());
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let root = std::env::temp_dir().join(format!("vehicle_pulse_test_{}", Uuid::new_v4()));
        let service = StorageService::new(&test_config(&root));

        let user_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();

        let stored = service
            .save(user_id, vehicle_id, "seguro 2025.pdf", "aG9sYQ==")
            .await
            .unwrap();

        assert_eq!(stored.size, 4);
        assert!(stored.file_name.ends_with("_seguro_2025.pdf"));
        assert!(stored
            .public_url
            .starts_with("http://localhost:3000/files/"));

        let on_disk = service.resolve(&stored.relative_path).unwrap();
        assert!(on_disk.exists());

        service.delete_by_url(&stored.public_url).await;
        assert!(!on_disk.exists());

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
