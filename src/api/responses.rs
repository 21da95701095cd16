//! API response envelopes
//!
//! JSON envelopes for operation outcomes and the mapping from storage
//! errors to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;

use crate::error::StorageError;

/// Standard API response envelope
#[derive(Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Response body for a completed upload
#[derive(Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub bytes_written: u64,
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StorageError::PathTraversal(_) => (StatusCode::FORBIDDEN, "Path not allowed"),
            StorageError::FileNotFound(_) => (StatusCode::NOT_FOUND, "File not found"),
            StorageError::NotAFile(_) => (StatusCode::BAD_REQUEST, "Not a regular file"),
            StorageError::Io(_) => {
                // Underlying detail goes to the log, never the client.
                error!("Storage failure: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal storage error")
            }
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}
