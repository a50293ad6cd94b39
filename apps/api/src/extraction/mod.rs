//! Document text extraction — turns an uploaded PDF or DOCX into plain text.
//!
//! DOCX files are ZIP archives; the main content lives in `word/document.xml`
//! and is scraped with a streaming XML reader (text runs joined, one newline
//! per paragraph).

pub mod contact;
pub mod handlers;

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Supported upload formats, detected from filename extension first and
/// content type second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn detect(filename: &str, content_type: &str) -> Option<Self> {
        let filename = filename.to_lowercase();
        if filename.ends_with(".pdf") || content_type == "application/pdf" {
            Some(DocumentKind::Pdf)
        } else if filename.ends_with(".docx") || content_type.contains("word") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

/// Extracts plain text from an uploaded document.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        }
        DocumentKind::Docx => extract_docx_text(bytes),
    }
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = Cursor::new(bytes);
    let mut archive =
        ZipArchive::new(cursor).map_err(|e| ExtractError::Docx(format!("not a zip archive: {e}")))?;

    let mut xml_content = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml_content)
        .map_err(|e| ExtractError::Docx(format!("failed to read document.xml: {e}")))?;

    let mut reader = Reader::from_str(&xml_content);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                let chunk = e
                    .unescape()
                    .map_err(|e| ExtractError::Docx(format!("bad XML text: {e}")))?;
                text.push_str(&chunk);
            }
            // paragraph boundary
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"p" => text.push('\n'),
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(format!("XML parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
