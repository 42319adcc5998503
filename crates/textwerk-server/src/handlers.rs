// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP request handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use textwerk_core::error::TextwerkError;
use textwerk_core::types::{DeclaredType, OutlineDocument};
use textwerk_extract::Dispatcher;
use tracing::{info, instrument};

use crate::AppState;
use crate::error::ApiError;
use crate::upload::TempUpload;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Process one uploaded document.
///
/// Expects a multipart form with a `file` part (the upload) and a
/// `file_type` part (one of `image`, `digital_pdf`, `handwritten_pdf`,
/// `doc`). The declared type is validated before any extraction work, and
/// the spooled temp file is removed on every exit path.
#[instrument(skip_all)]
pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OutlineDocument>, ApiError> {
    let mut filename: Option<String> = None;
    let mut file_bytes: Option<axum::body::Bytes> = None;
    let mut file_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        TextwerkError::BadRequest(format!("malformed multipart body: {err}"))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|err| {
                    TextwerkError::BadRequest(format!("failed to read upload: {err}"))
                })?;
                file_bytes = Some(bytes);
            }
            Some("file_type") => {
                let value = field.text().await.map_err(|err| {
                    TextwerkError::BadRequest(format!("failed to read file_type: {err}"))
                })?;
                file_type = Some(value);
            }
            _ => {}
        }
    }

    let file_type = file_type
        .ok_or_else(|| TextwerkError::BadRequest("file_type is required".to_string()))?;
    let declared = DeclaredType::from_str(&file_type)?;

    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TextwerkError::BadRequest("filename required".to_string()))?;
    let bytes = file_bytes
        .ok_or_else(|| TextwerkError::BadRequest("file upload is required".to_string()))?;
    if bytes.is_empty() {
        return Err(TextwerkError::BadRequest("empty file".to_string()).into());
    }

    info!(%declared, filename = %filename, bytes = bytes.len(), "Processing upload");
    let upload = TempUpload::spool(&state.config.temp_dir, &filename, &bytes).await?;

    // Extraction is blocking (OCR, PDF parsing); keep it off the runtime.
    let config = state.config.clone();
    let path = upload.path().to_path_buf();
    let document = tokio::task::spawn_blocking(move || {
        Dispatcher::new(config).process(&path, declared)
    })
    .await
    .map_err(|err| TextwerkError::Internal(format!("processing task failed: {err}")))??;

    drop(upload);
    Ok(Json(document))
}
