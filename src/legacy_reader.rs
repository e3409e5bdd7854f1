//! Pre-2007 OLE binaries: Word `.doc` and PowerPoint `.ppt`.

use crate::markdown;
use crate::reader::Document;
use anyhow::{Context, Result};
use litchi::ole::{doc, ppt};
use std::path::Path;

pub fn read_word(path: &Path) -> Result<Document> {
    let mut package = doc::Package::open(path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to open DOC: {}", path.display()))?;
    let text = package
        .document()
        .and_then(|document| document.text())
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to read DOC text: {}", path.display()))?;

    Ok(Document::untitled(markdown::clean_markdown(&text)))
}

pub fn read_presentation(path: &Path) -> Result<Document> {
    let mut package = ppt::Package::open(path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to open PPT: {}", path.display()))?;
    let presentation = package
        .presentation()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to parse PPT slides: {}", path.display()))?;
    let slides = presentation
        .slides()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to parse PPT slides: {}", path.display()))?;

    let mut texts = Vec::with_capacity(slides.len());
    for slide in &slides {
        let text = slide
            .text()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to read slide text: {}", path.display()))?;
        texts.push(text.to_string());
    }
    tracing::debug!(slides = texts.len(), "read presentation {}", path.display());

    Ok(Document::untitled(slides_to_markdown(&texts)))
}

/// One section per slide, numbered from 1 in an HTML comment.
fn slides_to_markdown(texts: &[String]) -> String {
    let mut md = String::new();
    for (i, text) in texts.iter().enumerate() {
        md.push_str(&format!("<!-- Slide number: {} -->\n", i + 1));
        md.push_str(text.trim());
        md.push_str("\n\n");
    }
    markdown::clean_markdown(&md)
}
