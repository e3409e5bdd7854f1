use crate::markdown;
use docx_rust::document::{
    BodyContent, Drawing, Hyperlink, Paragraph, ParagraphContent, Run, RunContent, Table,
    TableCell, TableCellContent, TableRowContent,
};
use docx_rust::formatting::CharacterProperty;
use docx_rust::Docx;
use std::collections::HashMap;

/// Render the body of a parsed DOCX document as Markdown.
pub fn docx_to_markdown(docx: &Docx) -> String {
    let mut writer = DocxWriter {
        docx,
        out: String::new(),
        list_counters: HashMap::new(),
    };

    for content in &docx.document.body.content {
        writer.write_block(content);
    }

    writer.out
}

struct DocxWriter<'a> {
    docx: &'a Docx<'a>,
    out: String,
    /// (num_id, level) -> last number emitted for ordered lists
    list_counters: HashMap<(isize, isize), usize>,
}

enum BlockKind {
    Heading(usize),
    ListItem { num_id: isize, level: isize },
    Body,
}

impl<'a> DocxWriter<'a> {
    fn write_block(&mut self, content: &BodyContent) {
        match content {
            BodyContent::Paragraph(para) => self.write_paragraph(para),
            BodyContent::Table(table) => self.write_table(table),
            BodyContent::Sdt(sdt) => {
                if let Some(ref sdt_content) = sdt.content {
                    for item in &sdt_content.content {
                        self.write_block(item);
                    }
                }
            }
            _ => {}
        }
    }

    fn write_paragraph(&mut self, para: &Paragraph) {
        let kind = block_kind(para);
        let inline = self.inline_text(para);
        let text = inline.trim();

        match kind {
            BlockKind::Heading(level) => {
                if !text.is_empty() {
                    self.out.push_str(&"#".repeat(level));
                    self.out.push(' ');
                    self.out.push_str(text);
                    self.out.push_str("\n\n");
                }
            }
            BlockKind::ListItem { num_id, level } => {
                let marker = self.list_marker(num_id, level);
                self.out.push_str(&"  ".repeat(level.max(0) as usize));
                self.out.push_str(&marker);
                self.out.push(' ');
                self.out.push_str(text);
                self.out.push('\n');
            }
            BlockKind::Body if text.is_empty() => self.out.push('\n'),
            BlockKind::Body => {
                self.out.push_str(text);
                self.out.push_str("\n\n");
            }
        }
    }

    /// Runs and hyperlinks of one paragraph, formatted inline.
    fn inline_text(&self, para: &Paragraph) -> String {
        let mut result = String::new();

        for pc in &para.content {
            match pc {
                ParagraphContent::Run(run) => {
                    let text = self.run_text(run);
                    if !text.is_empty() {
                        result.push_str(&emphasize(&text, &run.property));
                    }
                }
                ParagraphContent::Link(link) => {
                    let label = link
                        .content
                        .as_ref()
                        .map(|run| self.run_text(run))
                        .unwrap_or_default();

                    match (self.link_target(link), label.is_empty()) {
                        (Some(url), false) => result.push_str(&format!("[{}]({})", label, url)),
                        (Some(url), true) => result.push_str(&url),
                        (None, _) => result.push_str(&label),
                    }
                }
                _ => {}
            }
        }

        result
    }

    fn run_text(&self, run: &Run) -> String {
        let mut text = String::new();

        for rc in &run.content {
            match rc {
                RunContent::Text(t) => text.push_str(&t.text),
                RunContent::Break(_) => text.push('\n'),
                RunContent::Tab(_) => text.push('\t'),
                RunContent::Drawing(drawing) => {
                    if let Some(md) = self.image_reference(drawing) {
                        text.push_str(&md);
                    }
                }
                _ => {}
            }
        }

        text
    }

    /// `![alt](word/media/...)` for inline or floating pictures.
    fn image_reference(&self, drawing: &Drawing) -> Option<String> {
        let (graphic, alt) = if let Some(ref inline) = drawing.inline {
            (inline.graphic.as_ref()?, inline.doc_property.descr.as_deref())
        } else {
            let anchor = drawing.anchor.as_ref()?;
            (anchor.graphic.as_ref()?, anchor.doc_property.descr.as_deref())
        };

        let pic = graphic.data.children.first()?;
        let target = self.relationship_target(pic.fill.blip.embed.as_ref())?;
        Some(format!("![{}]({})", alt.unwrap_or(""), target))
    }

    fn link_target(&self, link: &Hyperlink) -> Option<String> {
        if let Some(ref anchor) = link.anchor {
            return Some(format!("#{}", anchor));
        }
        let id = link.id.as_ref()?;
        self.relationship_target(id.as_ref())
    }

    fn relationship_target(&self, rel_id: &str) -> Option<String> {
        self.docx
            .document_rels
            .as_ref()?
            .relationships
            .iter()
            .find(|r| r.id.as_ref() == rel_id)
            .map(|r| r.target.to_string())
    }

    /// `-` for bullets, `N.` for any numbered format; bullets when unresolved.
    fn list_marker(&mut self, num_id: isize, level: isize) -> String {
        match self.number_format(num_id, level).as_deref() {
            Some("decimal" | "upperRoman" | "lowerRoman" | "upperLetter" | "lowerLetter") => {
                let counter = self.list_counters.entry((num_id, level)).or_insert(0);
                *counter += 1;
                format!("{}.", counter)
            }
            _ => "-".to_string(),
        }
    }

    fn number_format(&self, num_id: isize, level: isize) -> Option<String> {
        let numbering = self.docx.numbering.as_ref()?;
        let abstract_id = numbering
            .numberings
            .iter()
            .find(|num| num.num_id == Some(num_id))?
            .abstract_num_id
            .as_ref()?
            .value;

        numbering
            .abstract_numberings
            .iter()
            .filter(|abs| abs.abstract_num_id == abstract_id)
            .flat_map(|abs| abs.levels.iter())
            .find(|lvl| lvl.i_level == Some(level))
            .and_then(|lvl| lvl.number_format.as_ref())
            .map(|fmt| fmt.value.to_string())
    }

    fn write_table(&mut self, table: &Table) {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .filter_map(|cell| match cell {
                        TableRowContent::TableCell(cell) => Some(self.cell_text(cell)),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        if rows.is_empty() {
            return;
        }

        self.out.push_str(&markdown::pipe_table(&rows));
        self.out.push('\n');
    }

    /// Paragraphs of a cell joined with `<br>`
    fn cell_text(&self, cell: &TableCell) -> String {
        cell.content
            .iter()
            .map(|tc| {
                let TableCellContent::Paragraph(para) = tc;
                self.inline_text(para).trim().to_string()
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

fn block_kind(para: &Paragraph) -> BlockKind {
    let Some(ref prop) = para.property else {
        return BlockKind::Body;
    };

    if let Some(level) = prop
        .style_id
        .as_ref()
        .and_then(|style| heading_level(style.value.as_ref()))
    {
        return BlockKind::Heading(level);
    }

    if let Some(ref num_prop) = prop.numbering {
        if let (Some(id), Some(level)) = (&num_prop.id, &num_prop.level) {
            return BlockKind::ListItem {
                num_id: id.value,
                level: level.value,
            };
        }
    }

    BlockKind::Body
}

/// Map a paragraph style id such as `Heading2` or `heading 2` to a level.
fn heading_level(style_id: &str) -> Option<usize> {
    let lower = style_id.to_ascii_lowercase();
    match lower.as_str() {
        "title" => return Some(1),
        "subtitle" => return Some(2),
        _ => {}
    }

    let digits = lower.strip_prefix("heading")?.trim_start();
    match digits.parse::<usize>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

/// Wrap run text in emphasis markers from its character properties.
fn emphasize(text: &str, props: &Option<CharacterProperty>) -> String {
    let Some(props) = props else {
        return text.to_string();
    };
    if text.trim().is_empty() {
        return text.to_string();
    }

    let bold = props.bold.as_ref().is_some_and(|b| b.value != Some(false));
    let italic = props.italics.as_ref().is_some_and(|i| i.value != Some(false));
    let strike = props.strike.is_some() || props.dstrike.is_some();

    let mut result = text.to_string();
    if strike {
        result = format!("~~{}~~", result);
    }
    match (bold, italic) {
        (true, true) => format!("***{}***", result),
        (true, false) => format!("**{}**", result),
        (false, true) => format!("*{}*", result),
        (false, false) => result,
    }
}
