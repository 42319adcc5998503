// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image extraction path — decode an uploaded photograph or scan, reduce it
// to a single grayscale channel, equalize its contrast, and hand it to OCR.

use std::path::Path;

use image::DynamicImage;
use imageproc::contrast::equalize_histogram;
use textwerk_core::error::TextwerkError;
use tracing::{debug, info, instrument};

use crate::ocr::OcrEngine;

/// Grayscale + histogram equalization. Scans with washed-out or uneven
/// lighting recognise noticeably better after this step.
pub fn prepare_for_ocr(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    DynamicImage::ImageLuma8(equalize_histogram(&gray))
}

/// Extract raw text from an image file via OCR.
#[instrument(skip(engine), fields(path = %path.as_ref().display()))]
pub fn extract_image_text(
    path: impl AsRef<Path>,
    engine: &OcrEngine,
) -> Result<String, TextwerkError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|err| {
        TextwerkError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    info!(
        width = decoded.width(),
        height = decoded.height(),
        "Image decoded"
    );

    let prepared = prepare_for_ocr(&decoded);
    let text = engine.recognize_text(&prepared)?;
    debug!(chars = text.len(), "Image OCR complete");
    Ok(text)
}
