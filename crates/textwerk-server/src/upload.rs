// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temp-file spooling for uploads. Each upload lands in the configured temp
// directory under a timestamp-prefixed name and is removed again when the
// guard drops, on every exit path of the request handler.

use std::path::{Path, PathBuf};

use chrono::Utc;
use textwerk_core::error::TextwerkError;
use tracing::{debug, warn};

/// An uploaded file spooled to disk, removed on drop.
///
/// Naming is collision-resistant (unix timestamp + original filename) rather
/// than locked; two simultaneous uploads with the same second and filename
/// could collide. Accepted as a narrow race.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `bytes` to `<temp_dir>/<unix-ts>_<filename>`.
    ///
    /// Only the final path component of `filename` is used, so an upload
    /// name cannot escape the temp directory.
    pub async fn spool(
        temp_dir: &Path,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Self, TextwerkError> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| TextwerkError::BadRequest("filename required".to_string()))?;

        tokio::fs::create_dir_all(temp_dir).await?;
        let path = temp_dir.join(format!("{}_{}", Utc::now().timestamp(), name));
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Upload spooled");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "Failed to remove temp upload");
            }
        }
    }
}
