// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the document processing pipeline and server.
///
/// Constructed once at startup and passed to the dispatcher explicitly —
/// there is no process-wide mutable tool-path state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where uploads are spooled before processing.
    pub temp_dir: PathBuf,
    /// Directory holding the OCR model files (`text-detection.rten` and
    /// `text-recognition.rten`). `None` falls back to the ocrs cache
    /// directory under `$XDG_CACHE_HOME`.
    pub ocr_model_dir: Option<PathBuf>,
    /// Binary invoked for legacy `.doc` extraction.
    pub antiword_binary: String,
    /// Port for the HTTP server.
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("temp"),
            ocr_model_dir: None,
            antiword_binary: "antiword".to_string(),
            server_port: 8000,
        }
    }
}
