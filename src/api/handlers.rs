//! HTTP handlers
//!
//! Thin plumbing between the transport and the storage core: each handler
//! resolves the caller-supplied path, invokes one storage operation, and
//! wraps the outcome in a JSON envelope or a byte stream.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use serde::Deserialize;
use std::io;
use tokio_util::io::ReaderStream;

use crate::api::responses::{ApiResponse, UploadResponse};
use crate::error::StorageError;
use crate::server::AppState;
use crate::storage::operations;
use crate::sysinfo::{self, SystemInfo};

/// Request body for the rename endpoint
#[derive(Deserialize)]
pub struct RenameRequest {
    pub from: String,
    pub to: String,
}

/// PUT /api/files/*path
///
/// Stores the request body at the resolved path, replacing any existing
/// file there.
pub async fn upload_file(
    State(state): State<AppState>,
    Path(raw_path): Path<String>,
    body: Body,
) -> Result<impl IntoResponse, StorageError> {
    let path = state.resolver.resolve(&raw_path)?;

    let stream = body
        .into_data_stream()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e));

    let result = operations::store_file(&path, stream).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            status: "success".to_string(),
            message: format!("Stored {}", raw_path),
            bytes_written: result.bytes_written,
        }),
    ))
}

/// GET /api/files/*path
///
/// Streams the file at the resolved path back to the caller.
pub async fn download_file(
    State(state): State<AppState>,
    Path(raw_path): Path<String>,
) -> Result<Response, StorageError> {
    let path = state.resolver.resolve(&raw_path)?;
    let retrieved = operations::open_file_stream(&path).await?;

    let stream = ReaderStream::new(retrieved.file);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, retrieved.size)
        .body(Body::from_stream(stream))
        .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::Other, e)))?;

    Ok(response)
}

/// DELETE /api/files/*path
pub async fn delete_file(
    State(state): State<AppState>,
    Path(raw_path): Path<String>,
) -> Result<Json<ApiResponse>, StorageError> {
    let path = state.resolver.resolve(&raw_path)?;
    operations::delete_file(&path).await?;
    Ok(Json(ApiResponse::ok(format!("Deleted {}", raw_path))))
}

/// POST /api/rename
///
/// Moves a file between two resolved paths inside the storage root.
pub async fn rename_file(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<ApiResponse>, StorageError> {
    let from = state.resolver.resolve(&request.from)?;
    let to = state.resolver.resolve(&request.to)?;
    operations::rename_entry(&from, &to).await?;

    Ok(Json(ApiResponse::ok(format!(
        "Renamed {} to {}",
        request.from, request.to
    ))))
}

/// GET /api/system
///
/// Disk capacity for the storage root's mount plus platform identification.
pub async fn system_info(
    State(state): State<AppState>,
) -> Result<Json<SystemInfo>, StorageError> {
    let info = sysinfo::gather(state.resolver.root()).map_err(StorageError::Io)?;
    Ok(Json(info))
}
