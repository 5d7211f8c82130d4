#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use http::{Request, StatusCode};
use oil_model_server::app::{build_router, AppState};
use oil_model_server::config::environment::{AppConfig, AuditStoreKind};
use oil_model_server::service::engine_service::SimulationEngine;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        rust_env: "test".to_string(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        audit_store: AuditStoreKind::Memory,
        mongodb_url: None,
        mongodb_database: "oil_model_test".to_string(),
        model_dir: "../model".to_string(),
        engine_command: None,
        engine_java_bin: "java".to_string(),
        engine_main_class: "ModelRunner".to_string(),
        engine_timeout_seconds: 0,
    }
}

pub fn test_state(engine: Arc<dyn SimulationEngine>) -> AppState {
    AppState::new(test_config(), None).with_engine(engine)
}

/// Thirty-one engine rows, one per year, in the stdout format.
pub fn yearly_csv(scenario: i64) -> String {
    let mut out = String::from("Year,Scenario,Revenue,ProductionVolume,NewWellsFund,OldWellsFund\n");
    for year in 0..=30 {
        out.push_str(&format!(
            "{:.2},{},{:.2},{:.2},{:.2},{:.2}\n",
            year as f64,
            scenario,
            60000.0 - year as f64 * 100.0,
            10.0 + year as f64 * 0.5,
            year as f64 * 3.0,
            100.0 - year as f64,
        ));
    }
    out
}

pub async fn send(
    app: axum::Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Body>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.unwrap_or_else(Body::empty))
        .expect("build request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse body")
    };
    (status, payload)
}

pub async fn post_json(
    app: axum::Router,
    path: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    let bytes = serde_json::to_vec(body).expect("serialize");
    send(app, "POST", path, token, Some(Body::from(bytes))).await
}

pub async fn get_json(app: axum::Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "GET", path, token, None).await
}

pub async fn login(app: axum::Router, username: &str, password: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/login",
        None,
        &json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

pub fn router(state: AppState) -> axum::Router {
    build_router(state)
}
