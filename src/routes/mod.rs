pub mod auth_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod file_routes;
pub mod fuel_routes;
pub mod maintenance_routes;
pub mod stats_routes;
pub mod vehicle_routes;

use axum::extract::State;
use axum::{middleware, routing::get, Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_middleware;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Ensambla el router completo de la aplicación.
///
/// Registro y login llevan rate limiting por IP; el resto de /api exige
/// un JWT válido. Los ficheros subidos se sirven en /files sin token,
/// las URLs solo se conocen a través de la API autenticada.
pub fn create_app(state: AppState) -> Router {
    let rate_limit = RateLimitState::new(&state.config);

    let auth = auth_routes::create_auth_router().layer(middleware::from_fn_with_state(
        rate_limit,
        rate_limit_middleware,
    ));

    let protected = Router::new()
        .nest("/api/auth", auth_routes::create_profile_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .nest("/api/fuel", fuel_routes::create_fuel_router())
        .nest(
            "/api/maintenance",
            maintenance_routes::create_maintenance_router(),
        )
        .nest("/api/document", document_routes::create_document_router())
        .nest("/api/stats", stats_routes::create_stats_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth)
        .nest("/files", file_routes::create_file_router())
        .merge(protected)
        .layer(cors_middleware(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let redis = if state.redis.is_connected().await {
        "connected"
    } else {
        "offline"
    };

    Json(serde_json::json!({
        "status": "ok",
        "service": "vehicle-pulse-backend",
        "redis": redis,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
