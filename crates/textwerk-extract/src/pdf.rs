// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF extraction paths, built on `lopdf`.
//
// Digital PDFs yield their embedded text layer directly. Scanned PDFs carry
// no text layer; their pages are (in practice) single full-page image
// XObjects, so those streams are decoded and handed to OCR instead.

use std::path::Path;

use lopdf::{Document, Object};
use textwerk_core::error::TextwerkError;
use tracing::{debug, info, instrument, warn};

/// Separator between per-page texts in the joined output.
const PAGE_SEPARATOR: &str = "\n\n";

/// Extract the embedded text of a digital PDF, page by page.
///
/// Pages yielding no text after trimming are skipped; a PDF with no text
/// layer at all produces an empty string, not an error.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_digital_pdf_text(path: impl AsRef<Path>) -> Result<String, TextwerkError> {
    let path = path.as_ref();
    let document = Document::load(path).map_err(|err| {
        TextwerkError::PdfError(format!("failed to open {}: {}", path.display(), err))
    })?;

    let pages = document.get_pages();
    info!(pages = pages.len(), "Digital PDF loaded");

    let mut page_texts = Vec::new();
    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|err| {
            TextwerkError::PdfError(format!(
                "text extraction failed on page {}: {}",
                page_number, err
            ))
        })?;
        if text.trim().is_empty() {
            debug!(page = page_number, "No embedded text, page skipped");
            continue;
        }
        page_texts.push(text);
    }

    debug!(pages_with_text = page_texts.len(), "Digital PDF extracted");
    Ok(page_texts.join(PAGE_SEPARATOR))
}

/// Extract text from a scanned or handwritten PDF by decoding each page's
/// image streams and running OCR over them.
///
/// Pages with no decodable image are skipped with a warning.
#[cfg(feature = "ocr")]
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_scanned_pdf_text(
    path: impl AsRef<Path>,
    engine: &crate::ocr::OcrEngine,
) -> Result<String, TextwerkError> {
    let path = path.as_ref();
    let document = Document::load(path).map_err(|err| {
        TextwerkError::PdfError(format!("failed to open {}: {}", path.display(), err))
    })?;

    let pages = document.get_pages();
    info!(pages = pages.len(), "Scanned PDF loaded");

    let mut page_texts = Vec::new();
    for (page_number, page_id) in pages {
        let images = page_images(&document, page_id);
        if images.is_empty() {
            warn!(page = page_number, "No decodable page image, page skipped");
            continue;
        }

        let mut page_text = String::new();
        for decoded in images {
            let prepared = crate::scan::prepare_for_ocr(&decoded);
            let text = engine.recognize_text(&prepared)?;
            if !page_text.is_empty() {
                page_text.push('\n');
            }
            page_text.push_str(&text);
        }
        debug!(page = page_number, chars = page_text.len(), "Page OCR done");
        page_texts.push(page_text);
    }

    Ok(page_texts.join(PAGE_SEPARATOR))
}

/// Follow a reference to its target object; non-references pass through.
#[cfg(feature = "ocr")]
fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Decode every image XObject reachable from a page's resource dictionary.
#[cfg(feature = "ocr")]
fn page_images(document: &Document, page_id: lopdf::ObjectId) -> Vec<image::DynamicImage> {
    let mut images = Vec::new();

    let Ok(page_dict) = document
        .get_object(page_id)
        .and_then(|object| object.as_dict())
    else {
        warn!(?page_id, "Page object is not a dictionary");
        return images;
    };

    let Ok(resources) = page_dict
        .get(b"Resources")
        .map(|object| resolve(document, object))
        .and_then(|object| object.as_dict())
    else {
        return images;
    };

    let Ok(xobjects) = resources
        .get(b"XObject")
        .map(|object| resolve(document, object))
        .and_then(|object| object.as_dict())
    else {
        return images;
    };

    for (name, object) in xobjects.iter() {
        let Object::Stream(stream) = resolve(document, object) else {
            continue;
        };
        let is_image = matches!(
            stream.dict.get(b"Subtype"),
            Ok(Object::Name(subtype)) if subtype.as_slice() == b"Image"
        );
        if !is_image {
            continue;
        }

        match decode_image_stream(document, stream) {
            Some(decoded) => images.push(decoded),
            None => {
                warn!(
                    name = %String::from_utf8_lossy(name),
                    "Image stream could not be decoded"
                );
            }
        }
    }

    images
}

/// Decode a single image XObject stream into a `DynamicImage`.
///
/// Handles JPEG streams (`DCTDecode`) via the `image` crate and raw
/// deflated `DeviceRGB`/`DeviceGray` data. Anything else (JPX, CCITT,
/// indexed palettes, exotic bit depths) is reported as undecodable.
#[cfg(feature = "ocr")]
fn decode_image_stream(document: &Document, stream: &lopdf::Stream) -> Option<image::DynamicImage> {
    let dict = &stream.dict;

    let filters: Vec<&[u8]> = match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.as_slice()],
        Ok(Object::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Object::Name(name) => Some(name.as_slice()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    if filters.contains(&b"DCTDecode".as_slice()) {
        // The stream content is a complete JPEG file.
        return image::load_from_memory(&stream.content).ok();
    }

    // FlateDecode (or unfiltered) raw pixel data.
    let width = dict.get(b"Width").and_then(Object::as_i64).ok()? as u32;
    let height = dict.get(b"Height").and_then(Object::as_i64).ok()? as u32;
    let bits = dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(8);
    if bits != 8 {
        return None;
    }

    let color_space = match dict.get(b"ColorSpace").map(|object| resolve(document, object)) {
        Ok(Object::Name(name)) => name.clone(),
        // ICCBased / indexed colour spaces are not handled.
        _ => return None,
    };

    let data = stream.decompressed_content().ok()?;
    match color_space.as_slice() {
        b"DeviceRGB" => {
            image::RgbImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgb8)
        }
        b"DeviceGray" => {
            image::GrayImage::from_raw(width, height, data).map(image::DynamicImage::ImageLuma8)
        }
        _ => None,
    }
}
