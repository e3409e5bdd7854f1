use crate::docx_markdown;
use crate::markdown;
use crate::reader::Document;
use anyhow::{Context, Result};
use docx_rust::core::Core;
use docx_rust::DocxFile;
use std::path::Path;

pub fn read(path: &Path) -> Result<Document> {
    // DocxFile owns the raw archive; the parsed Docx borrows from it.
    let file = DocxFile::from_file(path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to open DOCX: {}", path.display()))?;
    let docx = file
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to parse DOCX content: {}", path.display()))?;

    // Core properties come in namespaced and bare variants with the same fields
    let title = match &docx.core {
        Some(Core::CoreNamespace(c)) => c.title.as_deref().map(str::to_string),
        Some(Core::CoreNoNamespace(c)) => c.title.as_deref().map(str::to_string),
        None => None,
    }
    .filter(|t| !t.trim().is_empty());

    let md = docx_markdown::docx_to_markdown(&docx);
    Ok(Document {
        title,
        text_content: markdown::clean_markdown(&md),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

    const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/></Relationships>"#;

    /// numId 1: decimal at level 0; numId 2: bullet at level 1
    fn numbering_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{W_NS}"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl></w:abstractNum><w:abstractNum w:abstractNumId="1"><w:lvl w:ilvl="1"><w:numFmt w:val="bullet"/><w:lvlText w:val="o"/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num><w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num></w:numbering>"#
        )
    }

    fn styles_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"></w:styles>"#
        )
    }

    fn list_item(num_id: u32, level: u32, text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        )
    }

    fn cell(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        format!("<w:tc><w:tcPr/>{body}</w:tc>")
    }

    fn document_xml() -> String {
        let heading = r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Overview</w:t></w:r></w:p>"#;
        let link = r#"<w:p><w:r><w:t>See</w:t></w:r><w:hyperlink r:id="rId3"><w:r><w:t>the site</w:t></w:r></w:hyperlink></w:p>"#;
        let table = format!(
            r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol w:w="2000"/><w:gridCol w:w="2000"/></w:tblGrid><w:tr><w:trPr/>{}{}</w:tr><w:tr><w:trPr/>{}{}</w:tr></w:tbl>"#,
            cell(&["Name"]),
            cell(&["Notes"]),
            cell(&["Alpha"]),
            cell(&["one", "two"]),
        );
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:body>{heading}{}{}{}{}<w:p/>{link}{table}</w:body></w:document>"#,
            list_item(1, 0, "First step"),
            list_item(1, 0, "Second step"),
            list_item(2, 1, "Nested note"),
            list_item(9, 0, "Orphan item"),
        )
    }

    fn write_fixture(path: &Path) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/document.xml", document_xml()),
            ("word/styles.xml", styles_xml()),
            ("word/numbering.xml", numbering_xml()),
        ];
        for (name, body) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn converted_fixture() -> Document {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guide.docx");
        write_fixture(&path);
        read(&path).unwrap()
    }

    #[test]
    fn heading_and_lists_render_in_order() {
        let doc = converted_fixture();
        assert!(
            doc.text_content.starts_with(
                "# Overview\n\n1. First step\n2. Second step\n  - Nested note\n- Orphan item\n"
            ),
            "unexpected markdown:\n{}",
            doc.text_content
        );
        assert_eq!(doc.title, None);
    }

    #[test]
    fn empty_paragraph_separates_blocks() {
        let doc = converted_fixture();
        assert!(doc.text_content.contains("- Orphan item\n\nSee[the site](https://example.com)\n"));
    }

    #[test]
    fn table_cells_join_paragraphs() {
        let doc = converted_fixture();
        assert!(doc
            .text_content
            .ends_with("| Name | Notes |\n| --- | --- |\n| Alpha | one<br>two |\n"));
    }
}
