//! The fixed allow-list of convertible file extensions.

use std::path::Path;

/// Document families the built-in reader knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Word,
    /// Pre-2007 OLE `.doc`
    LegacyWord,
    PowerPoint,
    /// Pre-2007 OLE `.ppt`
    LegacyPowerPoint,
    Spreadsheet,
    Html,
    PlainText,
}

/// Sorted by extension; `supported_extensions` relies on the order.
const EXTENSIONS: &[(&str, Format)] = &[
    (".doc", Format::LegacyWord),
    (".docx", Format::Word),
    (".htm", Format::Html),
    (".html", Format::Html),
    (".pdf", Format::Pdf),
    (".ppt", Format::LegacyPowerPoint),
    (".pptx", Format::PowerPoint),
    (".txt", Format::PlainText),
    (".xls", Format::Spreadsheet),
    (".xlsx", Format::Spreadsheet),
];

impl Format {
    /// Case-insensitive lookup on the final extension of `path`.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.strip_prefix('.') == Some(ext.as_str()))
            .map(|(_, format)| *format)
    }
}

pub fn is_supported(path: &Path) -> bool {
    Format::from_path(path).is_some()
}

/// Supported extensions in sorted order, each with its leading dot.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    EXTENSIONS.iter().map(|(ext, _)| *ext)
}

/// The extension of `path` as shown in diagnostics, e.g. `.csv`.
pub fn extension_label(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => "(none)".to_string(),
    }
}
