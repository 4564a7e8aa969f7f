use axum::{
    body::Body,
    extract::{Path, State},
    http::{Response, StatusCode},
    routing::get,
    Router,
};

use crate::services::storage_service::content_type_for;
use crate::services::StorageService;
use crate::state::AppState;

/// Sirve los ficheros subidos bajo /files/{user}/{vehiculo}/{nombre}
pub fn create_file_router() -> Router<AppState> {
    Router::new().route("/*path", get(serve_file))
}

async fn serve_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response<Body>, StatusCode> {
    let storage = StorageService::new(&state.config);

    let resolved = storage
        .resolve(&path)
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if !resolved.exists() {
        log::warn!("❌ Fichero no encontrado: {:?}", resolved);
        return Err(StatusCode::NOT_FOUND);
    }

    match tokio::fs::read(&resolved).await {
        Ok(data) => {
            log::info!("📥 Sirviendo fichero: {} ({} bytes)", path, data.len());

            let response = Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", content_type_for(&path))
                .header("Content-Length", data.len().to_string())
                .body(Body::from(data))
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            Ok(response)
        }
        Err(e) => {
            log::error!("❌ Error leyendo fichero {}: {}", path, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
