use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use viskom_ml_core::MlError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

/// Handler failure. The frontend only reads `detail`, so every failure is
/// reported as a 500.
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<MlError> for ApiError {
    fn from(err: MlError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::internal(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("request failed: {}", self.message);
        let payload = Json(ErrorResponse {
            detail: self.message,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, payload).into_response()
    }
}

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
