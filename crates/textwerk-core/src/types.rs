// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Textwerk document processor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TextwerkError;

/// Format version stamped into every [`Metadata`] block.
pub const OUTLINE_FORMAT_VERSION: &str = "1.0";

/// Caller-supplied tag selecting which extraction path to use.
///
/// The type is declared, never inferred from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    /// Photograph or scan image — decoded and run through OCR.
    Image,
    /// PDF with an embedded text layer — text extracted directly.
    DigitalPdf,
    /// Scanned or handwritten PDF — page images run through OCR.
    HandwrittenPdf,
    /// Word document (`.docx` or legacy `.doc`).
    Doc,
}

impl DeclaredType {
    /// The wire string for this type, as accepted in upload requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::DigitalPdf => "digital_pdf",
            Self::HandwrittenPdf => "handwritten_pdf",
            Self::Doc => "doc",
        }
    }
}

impl std::str::FromStr for DeclaredType {
    type Err = TextwerkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "digital_pdf" => Ok(Self::DigitalPdf),
            "handwritten_pdf" => Ok(Self::HandwrittenPdf),
            "doc" => Ok(Self::Doc),
            other => Err(TextwerkError::BadRequest(format!(
                "invalid file type: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing metadata attached to every outline document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// When processing finished.
    pub processed_at: DateTime<Utc>,
    /// Outline format version.
    pub version: String,
}

impl Metadata {
    /// Metadata stamped with the current time and the current format version.
    pub fn now() -> Self {
        Self {
            processed_at: Utc::now(),
            version: OUTLINE_FORMAT_VERSION.to_string(),
        }
    }
}

/// One entry inside a section: a labelled subsection, a bullet list, or a
/// plain paragraph. Serialises with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SubsectionEntry {
    /// A `Label:` line — the label keeps its trailing colon.
    Subsection { label: String, content: String },
    /// A run of adjacent bullet lines, one item per line in input order.
    List { items: Vec<String> },
    /// Any other line seen while a section is open.
    Paragraph { content: String },
}

impl SubsectionEntry {
    /// Whether this entry is a bullet list (used for adjacent-line coalescing).
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }
}

/// A numbered logical unit of the document, opened by a `<digits>. <title>`
/// line and holding everything up to the next such line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The id as declared in the source text — not validated for uniqueness
    /// or ordering.
    pub section_id: i64,
    /// Title text following the number.
    pub title: String,
    /// Entries in input order.
    pub subsections: Vec<SubsectionEntry>,
}

impl Section {
    pub fn new(section_id: i64, title: impl Into<String>) -> Self {
        Self {
            section_id,
            title: title.into(),
            subsections: Vec::new(),
        }
    }
}

/// Top-level result of processing one document: metadata, the nested
/// outline, and the full cleaned text retained verbatim for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineDocument {
    pub metadata: Metadata,
    pub content: Vec<Section>,
    pub raw_text: String,
}

impl OutlineDocument {
    /// Wrap finalized sections and their source text with fresh metadata.
    pub fn new(content: Vec<Section>, raw_text: impl Into<String>) -> Self {
        Self {
            metadata: Metadata::now(),
            content,
            raw_text: raw_text.into(),
        }
    }
}
