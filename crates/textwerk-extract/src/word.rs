// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word extraction path.
//
// `.docx` is a ZIP archive whose main content lives in `word/document.xml`;
// the text runs are streamed out with `quick-xml`. Legacy `.doc` is handed
// to the external `antiword` tool and its stdout captured. Any other
// extension is rejected before the file contents are touched.

use std::io::Read;
use std::path::Path;
use std::process::Command;

use quick_xml::Reader;
use quick_xml::events::Event;
use textwerk_core::error::TextwerkError;
use tracing::{debug, info, instrument};
use zip::ZipArchive;

/// Extract raw text from a Word document, choosing the reader by extension.
#[instrument(skip(antiword_binary), fields(path = %path.as_ref().display()))]
pub fn extract_word_text(
    path: impl AsRef<Path>,
    antiword_binary: &str,
) -> Result<String, TextwerkError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => extract_docx_text(path),
        "doc" => extract_legacy_doc_text(path, antiword_binary),
        other => Err(TextwerkError::UnsupportedDocument(format!(
            "unsupported Word format: .{other}"
        ))),
    }
}

/// Pull the paragraph text out of a `.docx` archive.
///
/// Paragraphs (`w:p`) become lines; tabs become spaces and explicit breaks
/// (`w:br`) become newlines within a paragraph.
fn extract_docx_text(path: &Path) -> Result<String, TextwerkError> {
    let file = std::fs::File::open(path).map_err(|err| {
        TextwerkError::WordError(format!("failed to open {}: {}", path.display(), err))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|err| {
        TextwerkError::WordError(format!("{} is not a DOCX archive: {}", path.display(), err))
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|err| {
            TextwerkError::WordError(format!("missing word/document.xml: {}", err))
        })?
        .read_to_string(&mut xml)
        .map_err(|err| {
            TextwerkError::WordError(format!("failed to read word/document.xml: {}", err))
        })?;

    let paragraphs = paragraphs_from_document_xml(&xml)?;
    info!(paragraphs = paragraphs.len(), "DOCX extracted");
    Ok(paragraphs.join("\n"))
}

/// Stream `document.xml`, collecting the text of each `w:p` paragraph.
fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>, TextwerkError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => match element.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tab" => current.push(' '),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(element)) => match element.name().as_ref() {
                b"w:tab" => current.push(' '),
                b"w:br" => current.push('\n'),
                // A self-closing paragraph is still a paragraph.
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text_run => {
                let unescaped = text.unescape().map_err(|err| {
                    TextwerkError::WordError(format!("malformed text run: {}", err))
                })?;
                current.push_str(&unescaped);
            }
            Ok(Event::End(element)) => match element.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(TextwerkError::WordError(format!(
                    "malformed document.xml: {}",
                    err
                )));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Shell out to antiword for the legacy binary `.doc` format.
fn extract_legacy_doc_text(path: &Path, antiword_binary: &str) -> Result<String, TextwerkError> {
    debug!(binary = antiword_binary, "Running antiword");
    let output = Command::new(antiword_binary)
        .arg(path)
        .output()
        .map_err(|err| {
            TextwerkError::WordError(format!(
                "failed to run {antiword_binary}: {err}; legacy .doc extraction requires antiword"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TextwerkError::WordError(format!(
            "{antiword_binary} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
