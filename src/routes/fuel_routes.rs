use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::fuel_controller::FuelController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::fuel_dto::{CreateFuelRecordRequest, FuelRecordResponse, UpdateFuelRecordRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::fuel_record::FuelRecordFilters;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_fuel_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fuel_record))
        .route("/", get(list_fuel_records))
        .route("/:id", put(update_fuel_record))
        .route("/:id", delete(delete_fuel_record))
}

async fn create_fuel_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateFuelRecordRequest>,
) -> Result<Json<ApiResponse<FuelRecordResponse>>, AppError> {
    let controller = FuelController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_fuel_records(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<FuelRecordFilters>,
) -> Result<Json<Vec<FuelRecordResponse>>, AppError> {
    let controller = FuelController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.list(user.user_id, filters).await?;
    Ok(Json(response))
}

async fn update_fuel_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFuelRecordRequest>,
) -> Result<Json<ApiResponse<FuelRecordResponse>>, AppError> {
    let controller = FuelController::new(state.pool.clone(), state.record_cache.clone());
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_fuel_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = FuelController::new(state.pool.clone(), state.record_cache.clone());
    controller.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de combustible eliminado exitosamente"
    })))
}
