use crate::app::AppState;
use crate::module::shared::error::AppError;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;

/// Identity resolved from the bearer token, attached as a request extension.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers()).unwrap_or_default();
    let username = state.sessions.authenticate(&token)?;
    request.extensions_mut().insert(AuthUser { username });
    Ok(next.run(request).await)
}

/// Reads `Authorization: Bearer <token>`. A header without the prefix is
/// taken as the raw token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
