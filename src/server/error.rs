// src/server/error.rs
use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;

use crate::error::{ErrorKind, ScrapeError};

pub const SCRAPE_FAILED: &str = "Failed to scrape the page.";
pub const FILE_NOT_FOUND: &str = "File not found.";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// JSON error reply: `{"error": "...", "detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: s!(message), detail: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), detail: None }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        match e.kind() {
            ErrorKind::SourceUnavailable => Self {
                status: StatusCode::BAD_REQUEST,
                message: s!(SCRAPE_FAILED),
                detail: Some(e.to_string()),
            },
            ErrorKind::BadInput => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: e.to_string(),
                detail: None,
            },
            ErrorKind::Internal => Self::internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            loge!("HTTP {}: {}", self.status.as_u16(), self.message);
        } else {
            logd!("HTTP {}: {}", self.status.as_u16(), self.message);
        }
        let body = ErrorBody { error: self.message, detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}
