use super::controller;
use crate::app::AppState;
use crate::module::shared::error::method_fallback;
use axum::routing::post;
use axum::Router;

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(controller::login).fallback(method_fallback))
        .route(
            "/api/register",
            post(controller::register).fallback(method_fallback),
        )
        .route("/api/logout", post(controller::logout).fallback(method_fallback))
        .with_state(state)
}
