//! Markdown parsing into the block model, plus preview HTML rendering.

use crate::error::{Error, Result};
use crate::model::{
    Block, Cell, Document, HeadingLevel, Paragraph, Row, Table, TextAlignment, TextRun, TextStyle,
};
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Parser options used for both preview and conversion.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render Markdown source to an HTML fragment for previewing.
///
/// This is the library's native rendering, used before any conversion
/// is triggered.
pub fn to_preview_html(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Parser for Markdown sources.
pub struct MarkdownParser {
    source: String,
}

impl MarkdownParser {
    /// Create a parser from a Markdown string.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Create a parser from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(data)
            .map_err(|e| Error::Encoding(format!("input is not valid UTF-8: {e}")))?;
        Ok(Self::new(source))
    }

    /// Parse the source into the block model.
    pub fn parse(&self) -> Result<Document> {
        let parser = Parser::new_ext(&self.source, parser_options());
        let mut builder = BlockBuilder::new();
        for event in parser {
            builder.event(event);
        }
        Ok(builder.finish())
    }
}

/// Context for an open list.
struct ListContext {
    ordered: bool,
    next_number: u64,
}

/// Context for an open list item.
struct ItemContext {
    /// Set once the item's text has been emitted as a block. Further
    /// paragraphs in the same item become indented paragraphs.
    emitted: bool,
}

/// Folds a pulldown-cmark event stream into blocks.
struct BlockBuilder {
    doc: Document,
    runs: Vec<TextRun>,
    style: TextStyle,
    link: Option<String>,
    heading: Option<HeadingLevel>,
    quote_depth: u8,
    lists: Vec<ListContext>,
    items: Vec<ItemContext>,
    code_lang: Option<String>,
    code_text: Option<String>,
    table: Option<Table>,
    row: Option<Row>,
    cell_runs: Option<Vec<TextRun>>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            runs: Vec::new(),
            style: TextStyle::default(),
            link: None,
            heading: None,
            quote_depth: 0,
            lists: Vec::new(),
            items: Vec::new(),
            code_lang: None,
            code_text: None,
            table: None,
            row: None,
            cell_runs: None,
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(end) => self.end(end),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.push_run(TextRun::styled(code.into_string(), TextStyle::code()));
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.text("\n"),
            Event::Rule => self.doc.add_block(Block::Rule),
            Event::TaskListMarker(checked) => {
                self.text(if checked { "[x] " } else { "[ ] " });
            }
            // Raw HTML, footnotes and math pass through as plain text
            Event::Html(raw) | Event::InlineHtml(raw) => self.text(&raw),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.heading = Some(convert_heading(level));
            }
            Tag::BlockQuote(_) => self.quote_depth += 1,
            Tag::CodeBlock(kind) => {
                self.code_lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.into_string()),
                    _ => None,
                };
                self.code_text = Some(String::new());
            }
            Tag::List(start) => {
                // A nested list closes out the enclosing item's text so
                // that child items follow their parent in block order.
                self.emit_pending_item();
                self.lists.push(ListContext {
                    ordered: start.is_some(),
                    next_number: start.unwrap_or(1),
                });
            }
            Tag::Item => self.items.push(ItemContext { emitted: false }),
            Tag::Emphasis => self.style.italic = true,
            Tag::Strong => self.style.bold = true,
            Tag::Strikethrough => self.style.strikethrough = true,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.into_string()),
            Tag::Table(_) => self.table = Some(Table::new()),
            Tag::TableHead | Tag::TableRow => self.row = Some(Row::default()),
            Tag::TableCell => self.cell_runs = Some(Vec::new()),
            _ => {}
        }
    }

    fn end(&mut self, end: TagEnd) {
        match end {
            TagEnd::Paragraph => self.flush_paragraph(),
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(HeadingLevel::H6);
                let runs = std::mem::take(&mut self.runs);
                if self.doc.title.is_none() && level == HeadingLevel::H1 {
                    self.doc.title = Some(runs.iter().map(|r| r.text.as_str()).collect());
                }
                self.doc.add_block(Block::Heading { level, runs });
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                let text = self.code_text.take().unwrap_or_default();
                self.doc.add_block(Block::Code {
                    language: self.code_lang.take(),
                    text,
                });
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::Item => {
                self.emit_pending_item();
                self.items.pop();
            }
            TagEnd::Emphasis => self.style.italic = false,
            TagEnd::Strong => self.style.bold = false,
            TagEnd::Strikethrough => self.style.strikethrough = false,
            TagEnd::Link => self.link = None,
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.doc.add_block(Block::Table(table));
                }
            }
            TagEnd::TableHead => {
                self.finish_row();
                if let Some(ref mut table) = self.table {
                    table.has_header = true;
                }
            }
            TagEnd::TableRow => self.finish_row(),
            TagEnd::TableCell => {
                let runs = self.cell_runs.take().unwrap_or_default();
                if let Some(ref mut row) = self.row {
                    row.cells.push(Cell { runs });
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(ref mut code) = self.code_text {
            code.push_str(text);
            return;
        }
        let run = TextRun {
            text: text.to_string(),
            style: self.style.clone(),
            hyperlink: self.link.clone(),
        };
        self.push_run(run);
    }

    fn push_run(&mut self, run: TextRun) {
        if let Some(ref mut cell) = self.cell_runs {
            cell.push(run);
        } else {
            self.runs.push(run);
        }
    }

    /// Emit accumulated runs as the current item's text, once.
    fn emit_pending_item(&mut self) {
        let has_text = self.runs.iter().any(|r| !r.is_empty());
        let Some(item) = self.items.last_mut() else {
            return;
        };
        if item.emitted || !has_text {
            return;
        }
        item.emitted = true;

        let runs = std::mem::take(&mut self.runs);
        let level = (self.items.len().saturating_sub(1)) as u8;
        let (ordered, number) = match self.lists.last_mut() {
            Some(ctx) if ctx.ordered => {
                let n = ctx.next_number;
                ctx.next_number += 1;
                (true, Some(n))
            }
            _ => (false, None),
        };
        self.doc.add_block(Block::ListItem {
            ordered,
            number,
            level,
            runs,
        });
    }

    fn flush_paragraph(&mut self) {
        // Inside a list item the first paragraph is the item text;
        // later ones become indented paragraphs under it.
        if !self.items.is_empty() {
            if !self.items.last().map(|i| i.emitted).unwrap_or(false) {
                self.emit_pending_item();
                return;
            }
            let runs = std::mem::take(&mut self.runs);
            if runs.iter().all(|r| r.is_empty()) {
                return;
            }
            let level = self.items.len() as u8;
            self.doc.add_block(Block::Paragraph(Paragraph {
                runs,
                alignment: TextAlignment::Left,
                indent_level: level,
            }));
            return;
        }

        let runs = std::mem::take(&mut self.runs);
        if runs.iter().all(|r| r.is_empty()) {
            return;
        }

        let mut para = Paragraph {
            runs,
            alignment: TextAlignment::Left,
            indent_level: 0,
        };
        para.merge_adjacent_runs();

        if self.quote_depth > 0 {
            self.doc.add_block(Block::Quote(para));
        } else {
            self.doc.add_block(Block::Paragraph(para));
        }
    }

    fn finish_row(&mut self) {
        if let Some(row) = self.row.take() {
            if let Some(ref mut table) = self.table {
                table.rows.push(row);
            }
        }
    }

    fn finish(mut self) -> Document {
        // Flush any dangling inline content (malformed input).
        self.flush_paragraph();
        self.doc
    }
}

fn convert_heading(level: pulldown_cmark::HeadingLevel) -> HeadingLevel {
    use pulldown_cmark::HeadingLevel as H;
    match level {
        H::H1 => HeadingLevel::H1,
        H::H2 => HeadingLevel::H2,
        H::H3 => HeadingLevel::H3,
        H::H4 => HeadingLevel::H4,
        H::H5 => HeadingLevel::H5,
        H::H6 => HeadingLevel::H6,
    }
}
