use super::controller;
use crate::app::AppState;
use crate::module::auth::middleware::require_session;
use crate::module::shared::error::method_fallback;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/run-model",
            post(controller::run_model).fallback(method_fallback),
        )
        .route(
            "/api/history",
            get(controller::history).fallback(method_fallback),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .with_state(state)
}
