// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error mapping: every TextwerkError becomes a {"detail": ...} JSON
// body, 400 for caller faults and 500 for failures inside an extraction
// stage.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use textwerk_core::error::TextwerkError;

/// Wrapper giving `TextwerkError` an HTTP representation.
#[derive(Debug)]
pub struct ApiError(pub TextwerkError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_caller_fault() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<TextwerkError> for ApiError {
    fn from(err: TextwerkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}
