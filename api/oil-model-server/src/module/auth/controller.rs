use super::middleware::bearer_token;
use super::schema::{CredentialsRequest, LoginData};
use crate::app::AppState;
use crate::module::shared::envelope::ApiResponse;
use crate::module::shared::error::AppError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::info;

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    let req = parse_credentials(&body)?;
    let token = state.sessions.login(&req.username, &req.password)?;
    info!(username = %req.username, "user logged in");

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginData {
            token,
            username: req.username,
        },
    )))
}

pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let req = parse_credentials(&body)?;
    state.sessions.register(&req.username, &req.password)?;
    info!(username = %req.username, "user registered");

    Ok(Json(ApiResponse::message(
        "Registration successful. Please login.",
    )))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(&token)?;
    }
    Ok(Json(ApiResponse::message("Logged out")))
}

// decoded by hand so malformed JSON still gets an envelope
fn parse_credentials(body: &[u8]) -> Result<CredentialsRequest, AppError> {
    serde_json::from_slice(body)
        .map_err(|_| AppError::bad_request("INVALID_JSON", "Invalid JSON"))
}
