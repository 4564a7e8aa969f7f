use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::document_controller::DocumentController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::document_dto::{DocumentResponse, UpdateDocumentRequest, UploadDocumentRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::document::DocumentFilters;
use crate::services::StorageService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_document))
        .route("/", get(list_documents))
        .route("/:id", get(get_document))
        .route("/:id", put(update_document))
        .route("/:id", delete(delete_document))
}

fn controller(state: &AppState) -> DocumentController {
    DocumentController::new(
        state.pool.clone(),
        state.record_cache.clone(),
        StorageService::new(&state.config),
    )
}

async fn upload_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let response = controller(&state).upload(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<DocumentFilters>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let response = controller(&state).list(user.user_id, filters).await?;
    Ok(Json(response))
}

async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let response = controller(&state).get_by_id(id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let response = controller(&state).update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Documento eliminado exitosamente"
    })))
}
