mod common;

use common::{login, post_json, router, test_state};
use http::StatusCode;
use oil_model_server::module::model_run::schema::SimulationParameters;
use oil_model_server::service::engine_service::{
    execute, EngineError, ProcessEngine, SimulationEngine,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::Duration;

fn reference_engine() -> ProcessEngine {
    ProcessEngine::command(env!("CARGO_BIN_EXE_reference-engine"))
}

#[tokio::test]
async fn reference_engine_produces_full_grid() {
    let params = SimulationParameters {
        scenario: 2,
        drilling_rate: 40,
        oil_price: 70.0,
        exchange_rate: 90.0,
    };
    let rows = execute(&reference_engine(), &params)
        .await
        .expect("engine run");

    assert_eq!(rows.len(), 31);
    for (idx, row) in rows.iter().enumerate() {
        assert_eq!(row.year, idx as i64);
        assert_eq!(row.scenario, 2);
        assert!(row.production_volume > 0.0);
        let rebuilt = row.production_volume * params.oil_price * params.exchange_rate;
        // both figures went through two-decimal rounding independently
        assert!((row.revenue - rebuilt).abs() <= 0.005 * params.oil_price * params.exchange_rate + 0.01);
    }
    assert_eq!(rows[0].new_wells_fund, 0.0);
    assert!(rows[30].new_wells_fund > rows[10].new_wells_fund);
    assert!(rows[30].old_wells_fund < rows[0].old_wells_fund);
}

#[tokio::test]
async fn reference_engine_is_deterministic() {
    let params = SimulationParameters::default();
    let first = execute(&reference_engine(), &params).await.expect("first");
    let second = execute(&reference_engine(), &params).await.expect("second");
    assert_eq!(first, second);
}

#[tokio::test]
async fn reference_engine_serves_http_runs() {
    let app = router(test_state(Arc::new(reference_engine())));
    let token = login(app.clone(), "admin", "admin123").await;
    let (status, body) = post_json(
        app,
        "/api/run-model",
        Some(&token),
        &json!({ "scenario": 3, "drillingRate": 25, "oilPrice": 65.5, "exchangeRate": 88 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["results"].as_array().map(Vec::len), Some(31));
}

#[tokio::test]
async fn missing_binary_is_execution_failure() {
    let err = ProcessEngine::command("/definitely/not/an/engine")
        .run(&SimulationParameters::default())
        .await
        .expect_err("spawn must fail");
    assert!(matches!(err, EngineError::ExecutionFailed(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn stderr_becomes_failure_detail() {
    let engine = ProcessEngine::command("sh").with_args(["-c", "echo engine exploded >&2; exit 3"]);
    let err = engine
        .run(&SimulationParameters::default())
        .await
        .expect_err("non-zero exit");
    assert!(matches!(err, EngineError::ExecutionFailed(_)));
    assert!(err.detail().contains("engine exploded"));
}

#[cfg(unix)]
#[tokio::test]
async fn silent_failure_reports_exit_status() {
    let engine = ProcessEngine::command("sh").with_args(["-c", "exit 4"]);
    let err = engine
        .run(&SimulationParameters::default())
        .await
        .expect_err("non-zero exit");
    assert!(err.detail().contains("exit status"));
}

#[cfg(unix)]
#[tokio::test]
async fn slow_engine_hits_timeout() {
    let engine = ProcessEngine::command("sh")
        .with_args(["-c", "sleep 5"])
        .with_timeout(Some(Duration::from_millis(300)));
    let err = engine
        .run(&SimulationParameters::default())
        .await
        .expect_err("must time out");
    assert!(err.detail().contains("timed out"));
}

#[cfg(unix)]
#[tokio::test]
async fn garbage_stdout_yields_empty_grid() {
    let engine = ProcessEngine::command("sh").with_args(["-c", "echo not a csv"]);
    let rows = execute(&engine, &SimulationParameters::default())
        .await
        .expect("exit 0 is success");
    assert!(rows.is_empty());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_processes_run_side_by_side() {
    // the shell sleeps, then hands the four parameters to the reference engine
    let engine = ProcessEngine::command("sh").with_args([
        "-c",
        "sleep 1; exec \"$0\" \"$@\"",
        env!("CARGO_BIN_EXE_reference-engine"),
    ]);
    let params = SimulationParameters::default();

    let started = Instant::now();
    let (first, second) = tokio::join!(execute(&engine, &params), execute(&engine, &params));
    let elapsed = started.elapsed();

    assert_eq!(first.expect("first run").len(), 31);
    assert_eq!(second.expect("second run").len(), 31);
    assert!(elapsed < Duration::from_millis(1800), "elapsed {elapsed:?}");
}
