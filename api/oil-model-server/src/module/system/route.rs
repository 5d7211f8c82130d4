use super::controller;
use crate::app::AppState;
use crate::module::shared::error::method_fallback;
use axum::routing::get;
use axum::Router;

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(controller::status).fallback(method_fallback))
        .with_state(state)
}
