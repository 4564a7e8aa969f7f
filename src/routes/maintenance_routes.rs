use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceLogRequest, MaintenanceLogResponse, UpdateMaintenanceLogRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::maintenance_log::MaintenanceLogFilters;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance_log))
        .route("/", get(list_maintenance_logs))
        .route("/:id", put(update_maintenance_log))
        .route("/:id", delete(delete_maintenance_log))
}

async fn create_maintenance_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMaintenanceLogRequest>,
) -> Result<Json<ApiResponse<MaintenanceLogResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_maintenance_logs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<MaintenanceLogFilters>,
) -> Result<Json<Vec<MaintenanceLogResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.list(user.user_id, filters).await?;
    Ok(Json(response))
}

async fn update_maintenance_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceLogRequest>,
) -> Result<Json<ApiResponse<MaintenanceLogResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.record_cache.clone());
    controller.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de mantenimiento eliminado exitosamente"
    })))
}
