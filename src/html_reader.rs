use crate::markdown;
use crate::reader::Document;
use crate::text_reader;
use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

/// Elements whose text never belongs in the Markdown body
const DROPPED_ELEMENTS: &str = "head, script, style, noscript";

pub fn read(path: &Path) -> Result<Document> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read HTML file: {}", path.display()))?;
    convert_html(&text_reader::decode(&bytes))
}

/// Parse `html` into a DOM, take the `<title>`, prune non-content nodes and
/// render what is left of `<body>` as Markdown.
pub fn convert_html(html: &str) -> Result<Document> {
    let mut dom = Html::parse_document(html);
    let title = page_title(&dom)?;
    prune(&mut dom)?;

    let body = selector("body")?;
    let markup = match dom.select(&body).next() {
        Some(body) => body.inner_html(),
        None => dom.root_element().html(),
    };

    Ok(Document {
        title,
        text_content: markdown::html_to_markdown(&markup),
    })
}

/// Text of the first `<title>` element, whitespace-collapsed.
fn page_title(dom: &Html) -> Result<Option<String>> {
    let title = selector("title")?;
    Ok(dom
        .select(&title)
        .next()
        .map(|element| element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty()))
}

/// Detach dropped elements and comments from the tree.
fn prune(dom: &mut Html) -> Result<()> {
    let dropped = selector(DROPPED_ELEMENTS)?;
    let mut ids: Vec<_> = dom.select(&dropped).map(|element| element.id()).collect();
    ids.extend(
        dom.tree
            .nodes()
            .filter(|node| node.value().is_comment())
            .map(|node| node.id()),
    );

    for id in ids {
        if let Some(mut node) = dom.tree.get_mut(id) {
            node.detach();
        }
    }
    Ok(())
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", css, e))
}
