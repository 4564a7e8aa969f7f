use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::stats_controller::StatsController;
use crate::dto::stats_dto::{MonthlySpendingResponse, StatsQuery, VehicleStatsResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_stats_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle/:vehicle_id", get(vehicle_stats))
        .route("/vehicle/:vehicle_id/monthly", get(monthly_spending))
}

async fn vehicle_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<VehicleStatsResponse>, AppError> {
    let controller = StatsController::new(state.pool.clone());
    let response = controller.vehicle_stats(user.user_id, vehicle_id, query).await?;
    Ok(Json(response))
}

async fn monthly_spending(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<MonthlySpendingResponse>>, AppError> {
    let controller = StatsController::new(state.pool.clone());
    let response = controller.monthly_spending(user.user_id, vehicle_id).await?;
    Ok(Json(response))
}
