// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// textwerk-extract — Format dispatch and raw-text extraction for Textwerk.
//
// Maps a declared file type to its extraction path (image OCR, digital PDF
// text, scanned-PDF OCR, or Word) and funnels every result through the
// normalizer and outline builder. All heavy lifting is delegated to lopdf,
// image/imageproc, zip/quick-xml, and the ocrs OCR engine; this crate adds
// dispatch, error translation, and the pipeline plumbing.

pub mod dispatch;
pub mod pdf;
pub mod word;

#[cfg(feature = "ocr")]
pub mod ocr;
#[cfg(feature = "ocr")]
pub mod scan;

pub use dispatch::Dispatcher;

#[cfg(feature = "ocr")]
pub use ocr::{OcrConfig, OcrEngine};
