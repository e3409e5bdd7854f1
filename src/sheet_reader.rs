use crate::markdown;
use crate::reader::Document;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Each worksheet becomes a `## name` heading followed by a pipe table.
pub fn read(path: &Path) -> Result<Document> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let mut md = String::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet '{}' of {}", sheet_name, path.display()))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        push_sheet(&mut md, &sheet_name, &rows);
    }

    Ok(Document::untitled(markdown::clean_markdown(&md)))
}

/// Append one sheet: its heading, then a table whose header is the first
/// non-empty row. A sheet without rows contributes only the heading.
fn push_sheet(md: &mut String, name: &str, rows: &[Vec<String>]) {
    md.push_str(&format!("## {}\n\n", name));
    if !rows.is_empty() {
        md.push_str(&markdown::pipe_table(rows));
        md.push('\n');
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR:{e:?}"),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
