//! Local resume handling before anything is sent to the backend.
//!
//! The backend only accepts `.pdf` uploads. `--local-extract` reads the text
//! here with `pdf-extract` and posts it to `/profile/analyze` instead.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::ClientError;

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// Substituted when a PDF yields no text, matching the backend's own fallback.
pub const EMPTY_RESUME_PLACEHOLDER: &str =
    "Demo resume: Software Engineer with JavaScript, React, Python skills";

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Reads and validates a resume from disk.
    pub fn read(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Resume(format!("'{}' is not a file", path.display())))?
            .to_string();

        if !is_pdf_name(&file_name) {
            return Err(ClientError::Resume(format!(
                "'{file_name}': only PDF files are supported"
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::Resume(format!("cannot read '{}': {e}", path.display())))?;
        Self::from_bytes(file_name, bytes)
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ClientError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(ClientError::Resume(format!("'{file_name}' is empty")));
        }
        if bytes.len() > MAX_RESUME_BYTES {
            return Err(ClientError::Resume(format!(
                "'{file_name}' is {} bytes; the limit is 10 MB",
                bytes.len()
            )));
        }
        if !bytes.starts_with(b"%PDF") {
            warn!(file = %file_name, "resume does not start with a PDF header");
        }
        debug!(file = %file_name, size = bytes.len(), "resume loaded");
        Ok(Self { file_name, bytes })
    }

    /// Extracts plain text, substituting the placeholder when the PDF has none.
    pub fn extract_text(&self) -> Result<String, ClientError> {
        let text = pdf_extract::extract_text_from_mem(&self.bytes)
            .map_err(|e| ClientError::Resume(format!("failed to extract text from '{}': {e}", self.file_name)))?;
        Ok(normalize_text(&text))
    }
}

fn is_pdf_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Trims each line and drops blank runs; empty input becomes the placeholder.
pub fn normalize_text(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return EMPTY_RESUME_PLACEHOLDER.to_string();
    }
    lines.join("\n")
}
