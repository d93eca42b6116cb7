//! Text extraction — turns uploaded resume files into plain text for the scorer.
//!
//! Extraction fidelity is not a goal: whatever text the parser yields, garbled or
//! not, is scored as-is. PDF and DOCX parsing is CPU-bound and runs on the
//! blocking thread pool.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Upper bound on the decompressed DOCX body. Uploads are capped compressed,
/// so the archive entry needs its own limit.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError>;

    fn format(&self) -> &'static str;
}

pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
        .await??;
        Ok(text.trim().to_string())
    }

    fn format(&self) -> &'static str {
        "pdf"
    }
}

pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let xml = tokio::task::spawn_blocking(move || read_document_xml(&bytes)).await??;
        Ok(docx_xml_to_text(&xml))
    }

    fn format(&self) -> &'static str {
        "docx"
    }
}

pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }

    fn format(&self) -> &'static str {
        "txt"
    }
}

/// Picks an extractor from the file extension.
pub fn extractor_for(filename: &str) -> Result<Box<dyn TextExtractor>, ExtractionError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfExtractor)),
        "docx" => Ok(Box::new(DocxExtractor)),
        "txt" => Ok(Box::new(PlainTextExtractor)),
        _ => Err(ExtractionError::UnsupportedFormat(filename.to_string())),
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a DOCX archive: {e}")))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("missing word/document.xml: {e}")))?;
    if document.size() > MAX_DOCUMENT_XML_BYTES {
        return Err(ExtractionError::Docx(format!(
            "word/document.xml expands to {} bytes (limit {MAX_DOCUMENT_XML_BYTES})",
            document.size()
        )));
    }
    // Declared sizes can lie.
    let mut xml = String::new();
    (&mut document)
        .take(MAX_DOCUMENT_XML_BYTES + 1)
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    if xml.len() as u64 > MAX_DOCUMENT_XML_BYTES {
        return Err(ExtractionError::Docx(format!(
            "word/document.xml exceeds {MAX_DOCUMENT_XML_BYTES} bytes"
        )));
    }
    debug!(bytes = xml.len(), "Read DOCX document body");
    Ok(xml)
}

static PARAGRAPH_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("paragraph pattern is valid"));
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("tab pattern is valid"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Flattens WordprocessingML into one line per paragraph.
fn docx_xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
