use super::schema::StatusData;
use crate::app::AppState;
use crate::module::shared::envelope::ApiResponse;
use crate::service::metrics_service;
use axum::extract::State;
use axum::Json;
use chrono::Utc;

pub async fn status(State(state): State<AppState>) -> Json<ApiResponse<StatusData>> {
    let database = state.audit.probe().await;
    Json(ApiResponse::ok(
        "Server is running",
        StatusData {
            timestamp: Utc::now().timestamp(),
            version: env!("CARGO_PKG_VERSION"),
            database: database.as_str(),
            metrics: metrics_service::snapshot(),
        },
    ))
}
