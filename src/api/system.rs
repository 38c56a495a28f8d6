//! Status and health probes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState, HealthLiveResponse, HealthReadyResponse, SystemStatus};

/// `GET /api/system/status`
pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<Json<SystemStatus>, ApiError> {
    let product_count = state.store().product_count().await?;

    Ok(Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        product_count,
    }))
}

/// `GET /api/system/health/live`
pub async fn health_live() -> impl IntoResponse {
    Json(HealthLiveResponse { status: "alive" })
}

/// `GET /api/system/health/ready`
///
/// Ready once the database answers a trivial query.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let database = state.store().ping().await.is_ok();
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReadyResponse {
            ready: database,
            database,
        }),
    )
        .into_response()
}
