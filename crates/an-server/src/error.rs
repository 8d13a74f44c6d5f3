//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`an_core::Error`] so that route handlers
//! can return `Result<T, AppError>` directly.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: an_core::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: an_core::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }
}

impl From<an_core::Error> for AppError {
    fn from(e: an_core::Error) -> Self {
        Self::new(e)
    }
}

/// Body-limit rejections keep their 413; every other extractor failure is
/// a malformed request.
fn rejection_error(status: StatusCode, text: String) -> an_core::Error {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        an_core::Error::PayloadTooLarge(text)
    } else {
        an_core::Error::Validation(text)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection_error(rejection.status(), rejection.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self::new(rejection_error(e.status(), e.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection_error(rejection.status(), rejection.body_text()))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::new(an_core::Error::Internal(format!("blocking task failed: {e}")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
        }

        let code = match &self.inner {
            an_core::Error::Validation(_) => "validation_error",
            an_core::Error::PayloadTooLarge(_) => "payload_too_large",
            an_core::Error::Io { .. } => "io_error",
            an_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}
