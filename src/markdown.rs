/// Convert already-pruned HTML markup to Markdown.
pub fn html_to_markdown(html: &str) -> String {
    clean_markdown(&html2md::parse_html(html))
}

/// Normalise converter output: no runs of blank lines, no trailing
/// whitespace, exactly one final newline (or nothing at all).
pub fn clean_markdown(md: &str) -> String {
    let mut result = md.replace("\r\n", "\n");

    // Trim trailing whitespace per line
    result = result
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    // Collapse 3+ consecutive newlines to one blank line
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }

    let trimmed = result.trim().to_string();
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed + "\n"
    }
}

/// Render rows as a pipe table, using the first row as the header.
/// Short rows are padded to the widest row.
pub fn pipe_table(rows: &[Vec<String>]) -> String {
    let col_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if col_count == 0 {
        return String::new();
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for j in 0..col_count {
            let cell = row.get(j).map(|s| s.as_str()).unwrap_or("");
            out.push(' ');
            out.push_str(&escape_cell(cell));
            out.push_str(" |");
        }
        out.push('\n');

        if i == 0 {
            out.push('|');
            for _ in 0..col_count {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    out
}

fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
