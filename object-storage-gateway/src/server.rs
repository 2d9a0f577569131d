/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use aws_smithy_types::error::display::DisplayErrorContext;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tower_http::trace::TraceLayer;

use crate::error::{self, Error, ErrorKind};
use crate::io::InputStream;
use crate::key::ObjectKey;
use crate::Session;

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    session: Session,
    request_timeout: Duration,
}

impl AppState {
    /// Create gateway state around an established session.
    pub fn new(session: Session, request_timeout: Duration) -> Self {
        Self {
            session,
            request_timeout,
        }
    }

    /// Absolute deadline for a request starting now.
    fn deadline(&self) -> Instant {
        Instant::now() + self.request_timeout
    }
}

/// JSON envelope every route responds with.
#[derive(Debug, Serialize)]
struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    fn with_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

/// Transfer error carried out of a handler, mapped onto an HTTP status.
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind() {
            ErrorKind::InputInvalid => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::OperationCancelled => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", DisplayErrorContext(&err));
        }
        let body = ApiResponse {
            message: None,
            data: None,
            error: Some(format!("{}", DisplayErrorContext(&err))),
        };
        (status, Json(body)).into_response()
    }
}

/// Reject missing or blank required query parameters.
fn require<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(error::invalid_input(format!("{name} is required")).into()),
    }
}

fn size_string(bytes: u64) -> String {
    format!("{bytes} bytes")
}

#[derive(Debug, Deserialize)]
struct UploadParams {
    filename: Option<String>,
    folder: Option<String>,
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
) -> Result<Response, ApiError> {
    let filename = require(params.filename.as_deref(), "filename")?;
    let folder = require(params.folder.as_deref(), "folder")?;

    let key = ObjectKey::join(folder, filename)?;
    let body = InputStream::from_path(filename)?;

    let output = state
        .session
        .upload()
        .key(key.as_str())
        .body(body)
        .deadline(state.deadline())
        .send()
        .await?;

    let body = ApiResponse::with_data(
        "File uploaded successfully",
        serde_json::json!({
            "path": key.as_str(),
            "size": size_string(output.bytes_written()),
        }),
    );
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

#[derive(Debug, Deserialize)]
struct UploadBufferParams {
    objectname: Option<String>,
}

async fn upload_buffer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadBufferParams>,
    body: axum::body::Bytes,
) -> Result<Response, ApiError> {
    let objectname = require(params.objectname.as_deref(), "objectname")?;

    let output = state
        .session
        .upload()
        .key(objectname)
        .body(InputStream::from(body))
        .deadline(state.deadline())
        .send()
        .await?;

    let body = ApiResponse::with_data(
        "Buffer uploaded successfully",
        serde_json::json!({
            "path": objectname,
            "size": size_string(output.bytes_written()),
        }),
    );
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

#[derive(Debug, Deserialize)]
struct DownloadParams {
    objectname: Option<String>,
    destination: Option<String>,
}

async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let objectname = require(params.objectname.as_deref(), "objectname")?;
    let key = ObjectKey::parse(objectname)?;

    let destination = match params.destination.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_download_dir()?,
    };

    // flat layout under the destination directory, like the original CLI flow
    let basename = key
        .as_str()
        .rsplit('/')
        .next()
        .unwrap_or_else(|| key.as_str());
    let dest_path = destination.join(basename);

    tokio::fs::create_dir_all(&destination)
        .await
        .map_err(Error::from)?;
    let mut dest = tokio::fs::File::create(&dest_path)
        .await
        .map_err(Error::from)?;

    let output = state
        .session
        .download()
        .key(key.as_str())
        .deadline(state.deadline())
        .send(&mut dest)
        .await?;

    let body = ApiResponse::with_data(
        "File downloaded successfully",
        serde_json::json!({
            "path": dest_path.display().to_string(),
            "size": size_string(output.bytes_read()),
        }),
    );
    Ok((StatusCode::OK, Json(body)).into_response())
}

fn default_download_dir() -> Result<PathBuf, ApiError> {
    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join("Downloads")),
        None => Err(Error::new(
            ErrorKind::RuntimeError,
            "failed to resolve the user home directory",
        )
        .into()),
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    folder: Option<String>,
    prefix: Option<String>,
}

async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let mut listing = state.session.list_objects().deadline(state.deadline());
    // `folder` matches the historical API; `prefix` is the documented name
    if let Some(prefix) = params.folder.as_deref().or(params.prefix.as_deref()) {
        listing = listing.prefix(prefix);
    }
    let output = listing.send().await?;

    let body = if output.keys().is_empty() {
        ApiResponse::message("No files found")
    } else {
        ApiResponse::with_data("Files found", serde_json::json!(output.keys()))
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    objectname: Option<String>,
}

async fn delete_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    let objectname = require(params.objectname.as_deref(), "objectname")?;

    state
        .session
        .delete_object()
        .key(objectname)
        .deadline(state.deadline())
        .send()
        .await?;

    let body = ApiResponse::with_data(
        "File deleted successfully",
        serde_json::json!({ "path": objectname }),
    );
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/upload/buffer", post(upload_buffer))
        .route("/download", get(download_file))
        .route("/list", get(list_files))
        .route("/delete", delete(delete_file))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve the gateway until the listener closes.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<(), error::BoxError> {
    let addr = listener.local_addr()?;
    tracing::info!("gateway listening on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
