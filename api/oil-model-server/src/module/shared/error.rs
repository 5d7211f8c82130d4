use super::envelope::ApiResponse;
use crate::module::auth::crud::AuthError;
use crate::service::audit_service::AuditError;
use crate::service::engine_service::EngineError;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code,
            message: message.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            code: "METHOD_NOT_ALLOWED",
            message: "Method not allowed".to_string(),
        }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error_code = self.code, status = self.status.as_u16(), reason = %self.message, "request rejected");
        (self.status, Json(ApiResponse::<()>::failure(self.message))).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TooShort => AppError::bad_request(
                "CREDENTIALS_TOO_SHORT",
                "Username must be 3+ chars, password 4+ chars",
            ),
            AuthError::AlreadyExists => {
                AppError::conflict("USERNAME_TAKEN", "Username already exists")
            }
            AuthError::InvalidCredentials => {
                AppError::unauthorized("INVALID_CREDENTIALS", "Invalid username or password")
            }
            AuthError::Unauthorized => {
                AppError::unauthorized("UNAUTHORIZED", "Unauthorized. Please login.")
            }
            AuthError::LockPoisoned => {
                AppError::internal("STORE_LOCK_ERROR", "session store lock poisoned")
            }
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ExecutionFailed(detail) => AppError::internal(
                "ENGINE_EXECUTION_FAILED",
                format!("Model execution failed: {detail}"),
            ),
            EngineError::ParseFailed(detail) => AppError::internal(
                "ENGINE_PARSE_FAILED",
                format!("Failed to parse results: {detail}"),
            ),
        }
    }
}

impl From<AuditError> for AppError {
    fn from(err: AuditError) -> Self {
        let code = match err {
            AuditError::Unavailable(_) => "STORE_UNAVAILABLE",
            AuditError::Query(_) | AuditError::Write(_) => "STORE_QUERY_FAILED",
        };
        AppError::internal(code, format!("Failed to fetch history: {err}"))
    }
}

/// Preflight gets an empty 200 (the CORS layer adds headers); anything else
/// reaching a route with the wrong verb is a 405 envelope.
pub async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::method_not_allowed().into_response()
}

pub async fn not_found(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::not_found("ROUTE_NOT_FOUND", "Not found").into_response()
}
