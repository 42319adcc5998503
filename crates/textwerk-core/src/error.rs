// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Textwerk.

use thiserror::Error;

/// Top-level error type for all Textwerk operations.
#[derive(Debug, Error)]
pub enum TextwerkError {
    // -- Request validation --
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    // -- Extraction errors --
    #[error("PDF processing failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("Word document processing failed: {0}")]
    WordError(String),

    // -- Infrastructure --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl TextwerkError {
    /// Whether the error is the caller's fault (a malformed or unsupported
    /// request) rather than a failure inside an extraction stage.
    ///
    /// Drives the HTTP status mapping at the server boundary: caller faults
    /// become 400, everything else 500.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_) | Self::UnsupportedDocument(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TextwerkError>;
