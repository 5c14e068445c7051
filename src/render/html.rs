//! HTML renderer implementation.

use super::options::RenderOptions;
use crate::error::Result;
use crate::model::{Block, Document, Paragraph, Table, TextAlignment, TextRun};

/// Stylesheet for generated documents, tuned for Word-like output.
const DOCUMENT_CSS: &str = r#"body {
    font-family: 'Calibri', 'Arial', sans-serif;
    line-height: 1.6;
    color: #000000;
    max-width: 800px;
    margin: 40px auto;
    padding: 20px;
}
h1 {
    font-size: 28px;
    font-weight: bold;
    margin-top: 24px;
    margin-bottom: 12px;
    border-bottom: 2px solid #000000;
    padding-bottom: 8px;
}
h2 {
    font-size: 24px;
    font-weight: bold;
    margin-top: 20px;
    margin-bottom: 10px;
}
h3 {
    font-size: 20px;
    font-weight: bold;
    margin-top: 16px;
    margin-bottom: 8px;
}
h4, h5, h6 {
    font-size: 16px;
    font-weight: bold;
    margin-top: 12px;
    margin-bottom: 6px;
}
p {
    margin-bottom: 12px;
}
p.justified {
    text-align: justify;
}
p.indented {
    margin-left: 20px;
}
code {
    background-color: #f5f5f5;
    padding: 2px 6px;
    border-radius: 3px;
    font-family: 'Courier New', monospace;
    font-size: 14px;
    color: #c7254e;
}
pre {
    background-color: #f5f5f5;
    border: 1px solid #cccccc;
    border-radius: 4px;
    padding: 16px;
    overflow-x: auto;
    margin: 16px 0;
}
pre code {
    background-color: transparent;
    padding: 0;
    color: #000000;
    font-size: 13px;
    line-height: 1.5;
}
ul, ol {
    margin-left: 30px;
    margin-bottom: 12px;
}
li {
    margin-bottom: 6px;
}
blockquote {
    border-left: 4px solid #cccccc;
    padding-left: 16px;
    margin-left: 0;
    margin-right: 0;
    font-style: italic;
    color: #666666;
}
a {
    color: #0066cc;
    text-decoration: underline;
}
hr {
    border: none;
    border-top: 1px solid #cccccc;
    margin: 20px 0;
}
table {
    border-collapse: collapse;
    width: 100%;
    margin: 16px 0;
}
th, td {
    border: 1px solid #cccccc;
    padding: 8px;
    text-align: left;
}
th {
    background-color: #f5f5f5;
    font-weight: bold;
}
div.page-break {
    page-break-after: always;
}"#;

/// Render a document to a complete styled HTML document.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let fragment = to_html_fragment(doc);
    if options.fragment_only {
        return Ok(fragment);
    }

    let title = options
        .title
        .as_deref()
        .or(doc.title.as_deref())
        .or(doc.source.as_deref())
        .unwrap_or("Document");
    Ok(wrap_html_document(&fragment, title))
}

/// Embed a content fragment into the styled document shell.
pub fn wrap_html_document(fragment: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        DOCUMENT_CSS,
        fragment
    )
}

/// Render the document's blocks to an HTML fragment.
pub fn to_html_fragment(doc: &Document) -> String {
    let mut out = String::new();
    let mut list = ListWriter::new();

    for block in &doc.blocks {
        match block {
            Block::ListItem {
                ordered,
                level,
                runs,
                ..
            } => {
                list.item(&mut out, *ordered, *level);
                out.push_str(&render_runs(runs));
            }
            other => {
                list.close_all(&mut out);
                render_block(&mut out, other);
            }
        }
    }
    list.close_all(&mut out);
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, runs } => {
            let n = level.level().max(1);
            out.push_str(&format!("<h{}>{}</h{}>\n", n, render_runs(runs), n));
        }
        Block::Paragraph(para) => {
            out.push_str(&render_paragraph(para));
        }
        Block::Quote(para) => {
            out.push_str(&format!(
                "<blockquote><p>{}</p></blockquote>\n",
                render_runs(&para.runs)
            ));
        }
        Block::Code { language, text } => {
            let class = language
                .as_deref()
                .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
                .unwrap_or_default();
            out.push_str(&format!(
                "<pre><code{}>{}</code></pre>\n",
                class,
                escape_html(text)
            ));
        }
        Block::Rule => out.push_str("<hr>\n"),
        Block::Table(table) => out.push_str(&render_table(table)),
        Block::PageBreak => out.push_str("<div class=\"page-break\"></div>\n"),
        Block::ListItem { .. } => unreachable!("list items handled by ListWriter"),
    }
}

fn render_paragraph(para: &Paragraph) -> String {
    let class = if para.alignment == TextAlignment::Justify {
        " class=\"justified\""
    } else if para.indent_level > 0 {
        " class=\"indented\""
    } else {
        ""
    };
    format!("<p{}>{}</p>\n", class, render_runs(&para.runs))
}

fn render_table(table: &Table) -> String {
    let mut out = String::from("<table>\n");
    for (i, row) in table.rows.iter().enumerate() {
        let tag = if table.has_header && i == 0 { "th" } else { "td" };
        out.push_str("<tr>");
        for cell in &row.cells {
            out.push_str(&format!("<{}>{}</{}>", tag, render_runs(&cell.runs), tag));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn render_runs(runs: &[TextRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let mut text = escape_html(&run.text);
        if run.style.code {
            text = format!("<code>{text}</code>");
        }
        if run.style.bold {
            text = format!("<strong>{text}</strong>");
        }
        if run.style.italic {
            text = format!("<em>{text}</em>");
        }
        if run.style.strikethrough {
            text = format!("<del>{text}</del>");
        }
        if let Some(ref url) = run.hyperlink {
            text = format!("<a href=\"{}\">{}</a>", escape_html(url), text);
        }
        out.push_str(&text);
    }
    out
}

/// Escape text for HTML element and attribute contexts.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Tracks open `<ul>`/`<ol>` and `<li>` elements while writing
/// consecutive list items. A nested list is written inside its parent's
/// still-open `<li>`, the way pulldown-cmark's renderer nests them.
struct ListWriter {
    /// Open lists, outermost first: (ordered, level)
    open: Vec<(bool, u8)>,
    /// Whether an `<li>` is open in the list at the same depth
    li_open: Vec<bool>,
}

impl ListWriter {
    fn new() -> Self {
        Self {
            open: Vec::new(),
            li_open: Vec::new(),
        }
    }

    fn item(&mut self, out: &mut String, ordered: bool, level: u8) {
        // Close lists deeper than or mismatched with the incoming item.
        while let Some(&(open_ordered, open_level)) = self.open.last() {
            if open_level > level || (open_level == level && open_ordered != ordered) {
                self.close_one(out);
            } else {
                break;
            }
        }
        // Open lists until we reach the item's level. The enclosing
        // item's `<li>` stays open, so the child list nests inside it.
        while self
            .open
            .last()
            .map(|&(_, l)| l < level)
            .unwrap_or(true)
        {
            let next_level = self.open.last().map(|&(_, l)| l + 1).unwrap_or(0);
            out.push_str(if ordered { "<ol>\n" } else { "<ul>\n" });
            self.open.push((ordered, next_level));
            self.li_open.push(false);
            if next_level >= level {
                break;
            }
        }
        if let Some(li) = self.li_open.last_mut() {
            if *li {
                out.push_str("</li>\n");
            }
            *li = true;
        }
        out.push_str("<li>");
    }

    fn close_one(&mut self, out: &mut String) {
        if self.li_open.pop() == Some(true) {
            out.push_str("</li>\n");
        }
        if let Some((ordered, _)) = self.open.pop() {
            out.push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"x\""), "&quot;x&quot;");
    }

    #[test]
    fn test_heading_render() {
        let mut doc = Document::new();
        doc.add_block(Block::heading(HeadingLevel::H3, "Section <1>"));
        let html = to_html_fragment(&doc);
        assert_eq!(html, "<h3>Section &lt;1&gt;</h3>\n");
    }

    #[test]
    fn test_paragraph_classes() {
        let mut doc = Document::new();
        doc.add_block(Block::Paragraph(Paragraph::justified("body")));
        doc.add_block(Block::Paragraph(Paragraph::indented("1. item", 1)));
        let html = to_html_fragment(&doc);
        assert!(html.contains("<p class=\"justified\">body</p>"));
        assert!(html.contains("<p class=\"indented\">1. item</p>"));
    }

    #[test]
    fn test_page_break_marker() {
        let mut doc = Document::new();
        doc.add_block(Block::PageBreak);
        let html = to_html_fragment(&doc);
        assert_eq!(html.matches("page-break").count(), 1);
    }

    #[test]
    fn test_list_grouping() {
        let mut doc = Document::new();
        for text in ["one", "two"] {
            doc.add_block(Block::ListItem {
                ordered: false,
                number: None,
                level: 0,
                runs: vec![crate::model::TextRun::plain(text)],
            });
        }
        doc.add_block(Block::Paragraph(Paragraph::with_text("after")));
        let html = to_html_fragment(&doc);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("</ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.find("</ul>").unwrap() < html.find("<p>").unwrap());
    }

    #[test]
    fn test_nested_list_render() {
        let mut doc = Document::new();
        doc.add_block(Block::ListItem {
            ordered: false,
            number: None,
            level: 0,
            runs: vec![TextRun::plain("outer")],
        });
        doc.add_block(Block::ListItem {
            ordered: false,
            number: None,
            level: 1,
            runs: vec![TextRun::plain("inner")],
        });
        let html = to_html_fragment(&doc);
        // The child list nests inside the parent's <li>.
        assert_eq!(
            html,
            "<ul>\n<li>outer<ul>\n<li>inner</li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_full_document_shell() {
        let mut doc = Document::new();
        doc.title = Some("Notes".to_string());
        doc.add_block(Block::Paragraph(Paragraph::with_text("hello")));
        let html = to_html(&doc, &RenderOptions::new()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Notes</title>"));
        assert!(html.contains("Calibri"));
        assert!(html.contains("<p>hello</p>"));
    }

    #[test]
    fn test_code_block_render() {
        let mut doc = Document::new();
        doc.add_block(Block::Code {
            language: Some("rust".to_string()),
            text: "let x = 1 < 2;".to_string(),
        });
        let html = to_html_fragment(&doc);
        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_link_render() {
        let mut doc = Document::new();
        let mut para = Paragraph::new();
        para.add_run(TextRun::link("docs", "https://example.com"));
        doc.add_block(Block::Paragraph(para));
        let html = to_html_fragment(&doc);
        assert!(html.contains("<a href=\"https://example.com\">docs</a>"));
    }
}
