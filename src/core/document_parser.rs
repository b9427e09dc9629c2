use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use super::errors::CoreError;
use super::models::DocumentKind;
use super::pdf::PdfTextExtractor;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_DOC_CONTENT_TYPE: &str = "application/msword";

const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Result<Self, CoreError> {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match media_type.as_str() {
            PDF_CONTENT_TYPE => Ok(DocumentKind::Pdf),
            DOCX_CONTENT_TYPE => Ok(DocumentKind::Docx),
            LEGACY_DOC_CONTENT_TYPE => Err(legacy_doc_error(LEGACY_DOC_CONTENT_TYPE)),
            "" => Err(CoreError::UnsupportedFormat("<empty content type>".to_string())),
            _ => Err(CoreError::UnsupportedFormat(content_type.trim().to_string())),
        }
    }

    pub fn from_file_name(file_name: &str) -> Result<Self, CoreError> {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "doc" => Err(legacy_doc_error(file_name)),
            _ => Err(CoreError::UnsupportedFormat(file_name.to_string())),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_CONTENT_TYPE,
            DocumentKind::Docx => DOCX_CONTENT_TYPE,
        }
    }
}

fn legacy_doc_error(offender: &str) -> CoreError {
    CoreError::UnsupportedFormat(format!(
        "{offender} (legacy .doc files are not supported, upload a .docx or .pdf file)"
    ))
}

#[derive(Debug, Clone, Default)]
pub struct ResumeDocumentParser {
    pdf_text_extractor: PdfTextExtractor,
    preserve_line_breaks: bool,
}

impl ResumeDocumentParser {
    pub fn new(pdf_text_extractor: PdfTextExtractor) -> Self {
        Self {
            pdf_text_extractor,
            preserve_line_breaks: false,
        }
    }

    /// Joins fragments with `\n` instead of a single space.
    pub fn with_line_breaks(mut self, preserve_line_breaks: bool) -> Self {
        self.preserve_line_breaks = preserve_line_breaks;
        self
    }

    pub fn extract_text(&self, data: &[u8], content_type: &str) -> Result<String, CoreError> {
        let kind = DocumentKind::from_content_type(content_type)?;
        self.extract_kind(kind, data)
    }

    /// Resolves the kind from the declared content type, or from the file
    /// extension when the host only sent a generic or empty type.
    pub fn extract_text_for_file(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(DocumentKind, String), CoreError> {
        let declared = content_type.trim();
        let kind = if declared.is_empty() || declared.eq_ignore_ascii_case(GENERIC_CONTENT_TYPE) {
            DocumentKind::from_file_name(file_name)?
        } else {
            DocumentKind::from_content_type(declared)?
        };

        let text = self.extract_kind(kind, data)?;
        Ok((kind, text))
    }

    pub fn extract_kind(&self, kind: DocumentKind, data: &[u8]) -> Result<String, CoreError> {
        debug!(kind = ?kind, bytes = data.len(), "decoding document");

        let fragments = match kind {
            DocumentKind::Pdf => self
                .pdf_text_extractor
                .extract_pages(data)?
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
            DocumentKind::Docx => extract_docx_paragraphs(data)?,
        };

        let separator = if self.preserve_line_breaks { "\n" } else { " " };
        let text = fragments.join(separator);
        debug!(kind = ?kind, chars = text.len(), "document decoded");
        Ok(text)
    }
}

fn extract_docx_paragraphs(data: &[u8]) -> Result<Vec<String>, CoreError> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).map_err(docx_failed)?;

    let mut document_file = archive
        .by_name("word/document.xml")
        .map_err(docx_failed)?;
    let mut xml = String::new();
    document_file
        .read_to_string(&mut xml)
        .map_err(docx_failed)?;

    let mut reader = Reader::from_str(&xml);

    let mut buf = Vec::new();
    // Open paragraphs, innermost last. Text boxes nest `w:p` inside `w:p`.
    let mut open: Vec<String> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut in_text = false;
    // Depth inside `mc:Fallback`, which repeats the `mc:Choice` content.
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth += 1,
                _ if fallback_depth > 0 => {}
                b"w:p" => {
                    if let Some(outer) = open.last_mut() {
                        flush_paragraph(outer, &mut paragraphs);
                    }
                    open.push(String::new());
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if fallback_depth == 0
                    && matches!(e.name().as_ref(), b"w:tab" | b"w:br" | b"w:cr")
                {
                    if let Some(current) = open.last_mut() {
                        current.push(' ');
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                _ if fallback_depth > 0 => {}
                b"w:p" => {
                    if let Some(mut current) = open.pop() {
                        flush_paragraph(&mut current, &mut paragraphs);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if fallback_depth == 0 && in_text {
                    if let Some(current) = open.last_mut() {
                        let value = e.xml_content().map_err(docx_failed)?;
                        current.push_str(&value);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if fallback_depth == 0 && in_text {
                    if let Some(current) = open.last_mut() {
                        let name = String::from_utf8_lossy(&e);
                        if let Some(resolved) = resolve_entity(&name) {
                            current.push(resolved);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(docx_failed(err)),
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs)
}

/// Emits the buffered text as a fragment and empties the buffer, so text
/// around a nested paragraph keeps document order.
fn flush_paragraph(current: &mut String, paragraphs: &mut Vec<String>) {
    let paragraph = current.trim();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph.to_string());
    }
    current.clear();
}

fn docx_failed(err: impl std::fmt::Display) -> CoreError {
    CoreError::ExtractionFailed(format!("docx: {err}"))
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
