use super::crud;
use super::model::AuditRecord;
use super::schema::{RunModelData, SimulationRequest};
use crate::app::AppState;
use crate::module::auth::middleware::AuthUser;
use crate::module::shared::envelope::ApiResponse;
use crate::module::shared::error::AppError;
use axum::body::Bytes;
use axum::extract::State;
use axum::{Extension, Json};
use tracing::error;

pub async fn run_model(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<ApiResponse<RunModelData>>, AppError> {
    let req: SimulationRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request("INVALID_JSON", format!("Invalid JSON: {e}")))?;

    // detached so a dropped connection does not kill the engine mid-run
    let data = tokio::spawn(crud::run_model(state, user.username, req))
        .await
        .map_err(|e| {
            error!(error = %e, "model run task aborted");
            AppError::internal("RUN_TASK_FAILED", "Model execution failed: run task aborted")
        })??;

    Ok(Json(ApiResponse::ok("Simulation completed", data)))
}

pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<AuditRecord>>>, AppError> {
    let records = crud::history(&state, &user.username).await?;
    Ok(Json(ApiResponse::data(records)))
}
