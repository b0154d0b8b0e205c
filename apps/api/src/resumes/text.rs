//! Turns a stored resume file into plain text for skill extraction.

use anyhow::{anyhow, Result};

const PDF_MAGIC: &[u8] = b"%PDF";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// PDFs go through `pdf-extract`; anything else is read as UTF-8, replacing
/// invalid sequences.
///
/// CPU-bound and may panic on hostile PDFs: call it inside `spawn_blocking`.
pub fn resume_text(bytes: &[u8]) -> Result<String> {
    if is_pdf(bytes) {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| anyhow!("Failed to extract text from PDF resume: {e:?}"))
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Content type recorded for an upload: the client's value when it sent one,
/// otherwise sniffed from the bytes.
pub fn detect_content_type(declared: Option<&str>, bytes: &[u8]) -> String {
    match declared {
        Some(ct) if !ct.trim().is_empty() && ct != "application/octet-stream" => ct.to_string(),
        _ if is_pdf(bytes) => PDF_CONTENT_TYPE.to_string(),
        _ => "text/plain; charset=utf-8".to_string(),
    }
}
