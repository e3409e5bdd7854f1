use crate::formats::Format;
use crate::{
    docx_reader, html_reader, legacy_reader, pdf_reader, pptx_reader, sheet_reader, text_reader,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Result of converting one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: Option<String>,
    /// Markdown (or plain text) ready to be written out
    pub text_content: String,
}

impl Document {
    pub fn untitled(text_content: String) -> Self {
        Self {
            title: None,
            text_content,
        }
    }
}

/// Turns a file on disk into Markdown text.
///
/// Implementations are treated as opaque by the orchestrator: any error they
/// return becomes a per-file conversion failure.
pub trait DocumentReader {
    fn convert(&self, path: &Path) -> Result<Document>;
}

/// Dispatches on the file extension to the per-format readers in this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinReader;

impl DocumentReader for BuiltinReader {
    fn convert(&self, path: &Path) -> Result<Document> {
        let format = Format::from_path(path)
            .with_context(|| format!("No reader for file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?format, "reading document");

        match format {
            Format::PlainText => text_reader::read(path),
            Format::Html => html_reader::read(path),
            Format::Word => docx_reader::read(path),
            Format::PowerPoint => pptx_reader::read(path),
            Format::Spreadsheet => sheet_reader::read(path),
            Format::Pdf => pdf_reader::read(path),
            Format::LegacyWord => legacy_reader::read_word(path),
            Format::LegacyPowerPoint => legacy_reader::read_presentation(path),
        }
    }
}
