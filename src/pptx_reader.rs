use crate::markdown;
use crate::reader::Document;
use anyhow::{Context, Result};
use pptx_to_md::{ParserConfig, PptxContainer};
use std::path::Path;

/// One Markdown section per slide, each introduced by the parser's slide comment.
pub fn read(path: &Path) -> Result<Document> {
    let config = ParserConfig::builder()
        .extract_images(false)
        .include_slide_comment(true)
        .build();

    let mut container = PptxContainer::open(path, config)
        .with_context(|| format!("Failed to open PPTX: {}", path.display()))?;

    let slides = container
        .parse_all()
        .with_context(|| format!("Failed to parse PPTX slides: {}", path.display()))?;

    let mut md = String::new();
    let mut rendered = 0usize;
    for slide in slides {
        if let Some(slide_md) = slide.convert_to_md() {
            md.push_str(&slide_md);
            md.push_str("\n\n");
            rendered += 1;
        }
    }
    tracing::debug!(slides = rendered, "rendered presentation {}", path.display());

    Ok(Document::untitled(markdown::clean_markdown(&md)))
}
