// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine — text recognition for scanned pages and photographs, built on
// the `ocrs` crate (neural models executed via `rten`).
//
// Only available with the `ocr` feature. The engine needs two model files,
// `text-detection.rten` and `text-recognition.rten`; running `ocrs-cli` once
// downloads them into the default cache directory (`$XDG_CACHE_HOME/ocrs`).

use std::path::{Path, PathBuf};

use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use textwerk_core::error::TextwerkError;
use tracing::{debug, info, instrument};

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// The ocrs model cache directory: `$XDG_CACHE_HOME/ocrs`, falling back to
/// `~/.cache/ocrs`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Model file locations for constructing an [`OcrEngine`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Point at a directory containing both model files under their
    /// well-known names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Check that both model files exist before attempting the (slow) load.
    pub fn validate(&self) -> Result<(), TextwerkError> {
        for path in [&self.detection_model_path, &self.recognition_model_path] {
            if !path.exists() {
                return Err(TextwerkError::OcrError(format!(
                    "OCR model not found at {}; run `ocrs-cli` once to download the models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Text recognition engine for page images.
///
/// Model loading is the expensive step; a constructed engine can be reused
/// across pages. Debug builds of `rten` are far too slow for real use —
/// compile in release mode.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    /// Load the detection and recognition models named by `config`.
    #[instrument(skip_all, fields(detection = %config.detection_model_path.display()))]
    pub fn new(config: OcrConfig) -> Result<Self, TextwerkError> {
        config.validate()?;

        info!("Loading OCR models");
        let detection_model = Model::load_file(&config.detection_model_path).map_err(|err| {
            TextwerkError::OcrError(format!(
                "failed to load detection model from {}: {}",
                config.detection_model_path.display(),
                err
            ))
        })?;
        let recognition_model =
            Model::load_file(&config.recognition_model_path).map_err(|err| {
                TextwerkError::OcrError(format!(
                    "failed to load recognition model from {}: {}",
                    config.recognition_model_path.display(),
                    err
                ))
            })?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| {
            TextwerkError::OcrError(format!("failed to initialise OCR engine: {}", err))
        })?;

        info!("OCR engine ready");
        Ok(Self { engine })
    }

    /// Recognise all text in a page image, returned with `\n` line breaks.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn recognize_text(&self, image: &DynamicImage) -> Result<String, TextwerkError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            TextwerkError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| TextwerkError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| TextwerkError::OcrError(format!("OCR recognition failed: {}", err)))?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR complete"
        );
        Ok(text)
    }
}
