use super::model::AuditRecord;
use super::schema::{RunModelData, SimulationRequest};
use crate::app::AppState;
use crate::service::audit_service::AuditError;
use crate::service::engine_service::{self, EngineError};
use crate::service::metrics_service;
use crate::service::validation_service::normalize_parameters;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

/// Normalizes `req`, runs the engine once and writes the audit record
/// whatever the outcome.
pub async fn run_model(
    state: AppState,
    username: String,
    req: SimulationRequest,
) -> Result<RunModelData, EngineError> {
    let params = normalize_parameters(&req);
    metrics_service::inc_runs_started();
    info!(
        username = %username,
        scenario = params.scenario,
        drilling_rate = params.drilling_rate,
        oil_price = params.oil_price,
        exchange_rate = params.exchange_rate,
        "model run started"
    );

    let started = Instant::now();
    let outcome = engine_service::execute(state.engine.as_ref(), &params).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    metrics_service::record_engine_duration_ms(elapsed_ms);

    match outcome {
        Ok(results) => {
            metrics_service::inc_runs_succeeded();
            state
                .audit
                .record(&username, &params, true, results.len() as i64, None)
                .await;
            info!(username = %username, rows = results.len(), elapsed_ms, "model run completed");
            Ok(RunModelData {
                parameters: params,
                results,
                timestamp: Utc::now().timestamp(),
            })
        }
        Err(err) => {
            metrics_service::inc_runs_failed();
            metrics_service::set_last_error_ts(Utc::now().timestamp());
            state
                .audit
                .record(&username, &params, false, 0, Some(err.detail()))
                .await;
            warn!(username = %username, error = %err, elapsed_ms, "model run failed");
            Err(err)
        }
    }
}

pub async fn history(state: &AppState, username: &str) -> Result<Vec<AuditRecord>, AuditError> {
    state.audit.history(username).await
}
