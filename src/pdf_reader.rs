use crate::markdown;
use crate::reader::Document;
use anyhow::{Context, Result};
use std::path::Path;

/// Text layer of a PDF. Scanned pages without text produce an empty document.
pub fn read(path: &Path) -> Result<Document> {
    let text = pdf_extract::extract_text(path)
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))?;

    if text.trim().is_empty() {
        tracing::debug!("PDF has no extractable text: {}", path.display());
    }

    Ok(Document::untitled(markdown::clean_markdown(&text)))
}
