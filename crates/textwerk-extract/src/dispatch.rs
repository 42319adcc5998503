// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Format dispatcher — routes a declared file type to its extraction path and
// funnels the raw text through the normalizer and outline builder.
//
// Tool paths (OCR models, the antiword binary) come in via the config handed
// to the constructor; there is no process-wide mutable state.

use std::path::Path;
use std::sync::Arc;

use textwerk_core::config::AppConfig;
use textwerk_core::error::TextwerkError;
use textwerk_core::types::{DeclaredType, OutlineDocument};
use textwerk_outline::{build_outline, normalize_lines};
use tracing::{info, instrument};

/// Maps a declared file type to the extraction routine producing raw text,
/// then builds the outline document from the cleaned result.
pub struct Dispatcher {
    config: Arc<AppConfig>,
}

impl Dispatcher {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Run the full pipeline for one uploaded file.
    ///
    /// Extraction failures surface as the stage-tagged error variants; an
    /// unsupported Word extension is rejected before any extraction work.
    /// No retries, no partial text.
    #[instrument(skip(self), fields(declared = %declared, path = %path.display()))]
    pub fn process(
        &self,
        path: &Path,
        declared: DeclaredType,
    ) -> Result<OutlineDocument, TextwerkError> {
        let raw_text = match declared {
            DeclaredType::Image => self.image_text(path)?,
            DeclaredType::DigitalPdf => crate::pdf::extract_digital_pdf_text(path)?,
            DeclaredType::HandwrittenPdf => self.scanned_pdf_text(path)?,
            DeclaredType::Doc => {
                crate::word::extract_word_text(path, &self.config.antiword_binary)?
            }
        };

        // Cleaned line by line so the outline builder still sees the line
        // boundaries the extractors produced.
        let cleaned = normalize_lines(&raw_text);
        let document = build_outline(&cleaned);
        info!(sections = document.content.len(), "Document processed");
        Ok(document)
    }

    #[cfg(feature = "ocr")]
    fn ocr_engine(&self) -> Result<crate::ocr::OcrEngine, TextwerkError> {
        let config = match &self.config.ocr_model_dir {
            Some(dir) => crate::ocr::OcrConfig::from_dir(dir),
            None => crate::ocr::OcrConfig::default(),
        };
        crate::ocr::OcrEngine::new(config)
    }

    #[cfg(feature = "ocr")]
    fn image_text(&self, path: &Path) -> Result<String, TextwerkError> {
        let engine = self.ocr_engine()?;
        crate::scan::extract_image_text(path, &engine)
    }

    #[cfg(feature = "ocr")]
    fn scanned_pdf_text(&self, path: &Path) -> Result<String, TextwerkError> {
        let engine = self.ocr_engine()?;
        crate::pdf::extract_scanned_pdf_text(path, &engine)
    }

    #[cfg(not(feature = "ocr"))]
    fn image_text(&self, _path: &Path) -> Result<String, TextwerkError> {
        Err(TextwerkError::OcrError(
            "OCR support not compiled in; rebuild with the `ocr` feature".to_string(),
        ))
    }

    #[cfg(not(feature = "ocr"))]
    fn scanned_pdf_text(&self, _path: &Path) -> Result<String, TextwerkError> {
        Err(TextwerkError::OcrError(
            "OCR support not compiled in; rebuild with the `ocr` feature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use textwerk_core::types::SubsectionEntry;
    use zip::write::SimpleFileOptions;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(AppConfig::default()))
    }

    /// A structurally valid PDF with zero pages.
    fn write_empty_pdf(path: &Path) {
        use lopdf::{Document, Object, dictionary};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).expect("save pdf");
    }

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        archive
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        archive.write_all(document_xml.as_bytes()).unwrap();
        archive.finish().unwrap();
    }

    #[test]
    fn digital_pdf_without_text_yields_empty_document_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan-only.pdf");
        write_empty_pdf(&path);

        let document = dispatcher()
            .process(&path, DeclaredType::DigitalPdf)
            .unwrap();
        assert!(document.content.is_empty());
        assert!(document.raw_text.is_empty());
    }

    #[test]
    fn docx_flows_through_the_outline_builder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        write_docx(
            &path,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>1. Findings</w:t></w:r></w:p>
    <w:p><w:r><w:t>Summary:   everything is fine</w:t></w:r></w:p>
    <w:p><w:r><w:t>* checked twice</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );

        let document = dispatcher().process(&path, DeclaredType::Doc).unwrap();
        assert_eq!(document.content.len(), 1);
        let section = &document.content[0];
        assert_eq!(section.section_id, 1);
        assert_eq!(section.title, "Findings");
        assert_eq!(
            section.subsections,
            vec![
                SubsectionEntry::Subsection {
                    label: "Summary:".to_string(),
                    // Runs of whitespace are collapsed by normalization.
                    content: "everything is fine".to_string(),
                },
                SubsectionEntry::List {
                    items: vec!["checked twice".to_string()],
                },
            ]
        );
    }

    #[test]
    fn unsupported_word_extension_is_a_caller_fault() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.rtf");
        std::fs::write(&path, b"{\\rtf1}").unwrap();

        let err = dispatcher()
            .process(&path, DeclaredType::Doc)
            .unwrap_err();
        assert!(matches!(err, TextwerkError::UnsupportedDocument(_)));
        assert!(err.is_caller_fault());
    }

    #[test]
    fn corrupt_pdf_is_an_internal_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = dispatcher()
            .process(&path, DeclaredType::DigitalPdf)
            .unwrap_err();
        assert!(matches!(err, TextwerkError::PdfError(_)));
        assert!(!err.is_caller_fault());
    }
}
