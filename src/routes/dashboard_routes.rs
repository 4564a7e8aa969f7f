use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::stats_dto::{
    ActivityItemResponse, ActivityQuery, DashboardQuery, DashboardSummaryResponse,
    DocumentAlertResponse, TimelineItemResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/timeline", get(timeline))
        .route("/alerts", get(alerts))
        .route("/activity", get(activity))
}

async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummaryResponse>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.summary(user.user_id, query).await?;
    Ok(Json(response))
}

async fn timeline(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<TimelineItemResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.timeline(user.user_id, query).await?;
    Ok(Json(response))
}

async fn alerts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<DocumentAlertResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.alerts(user.user_id, query).await?;
    Ok(Json(response))
}

async fn activity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityItemResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.activity(user.user_id, query).await?;
    Ok(Json(response))
}
