/*
 * Responsibility
 * - request filter / extractor が返す ApiError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// No verified identity (authenticator in `reject` mode, or a handler that needs one).
    #[error("unauthorized")]
    Unauthorized,
    /// Identity present but its member type is not on the route's allow-list.
    #[error("member type not allowed")]
    Forbidden,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Role-gate denials are reported as 401, like a missing identity.
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden => (StatusCode::UNAUTHORIZED, "FORBIDDEN"),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
