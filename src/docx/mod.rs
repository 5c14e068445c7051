//! DOCX encoding of the block model.

use crate::error::{Error, Result};
use crate::model::{Block, Document, HeadingLevel, Paragraph, Table, TextAlignment, TextRun};
use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, RunFonts, Start, TableCell, TableRow,
};
use std::io::Cursor;

/// Numbering definition id for bulleted lists.
const BULLET_NUMBERING: usize = 1;

/// Numbering definition id for decimal lists.
const DECIMAL_NUMBERING: usize = 2;

/// Monospace font for code runs.
const CODE_FONT: &str = "Courier New";

/// Indentation step per level, in twentieths of a point.
const INDENT_STEP: i32 = 420;

/// Encodes documents into Word binaries.
pub struct DocxEncoder;

impl DocxEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a document into `.docx` bytes.
    pub fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut docx = Docx::new()
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING).add_level(
                    Level::new(
                        0,
                        Start::new(1),
                        NumberFormat::new("bullet"),
                        LevelText::new("•"),
                        LevelJc::new("left"),
                    ),
                ),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING))
            .add_abstract_numbering(
                AbstractNumbering::new(DECIMAL_NUMBERING).add_level(
                    Level::new(
                        0,
                        Start::new(1),
                        NumberFormat::new("decimal"),
                        LevelText::new("%1."),
                        LevelJc::new("left"),
                    ),
                ),
            )
            .add_numbering(Numbering::new(DECIMAL_NUMBERING, DECIMAL_NUMBERING));

        for block in &doc.blocks {
            docx = self.encode_block(docx, block);
        }

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| Error::DocxEncode(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn encode_block(&self, docx: Docx, block: &Block) -> Docx {
        match block {
            Block::Heading { level, runs } => {
                docx.add_paragraph(heading_paragraph(*level, runs))
            }
            Block::Paragraph(para) => docx.add_paragraph(body_paragraph(para)),
            Block::Quote(para) => {
                let mut p = docx_rs::Paragraph::new().indent(
                    Some(INDENT_STEP),
                    None,
                    None,
                    None,
                );
                for run in &para.runs {
                    p = p.add_run(text_run(run).italic());
                }
                docx.add_paragraph(p)
            }
            Block::Code { text, .. } => {
                let mut docx = docx;
                for line in text.lines() {
                    let run = docx_rs::Run::new()
                        .add_text(line)
                        .fonts(RunFonts::new().ascii(CODE_FONT))
                        .size(20);
                    docx = docx.add_paragraph(
                        docx_rs::Paragraph::new()
                            .add_run(run)
                            .indent(Some(INDENT_STEP), None, None, None),
                    );
                }
                docx
            }
            Block::ListItem {
                ordered,
                level,
                runs,
                ..
            } => {
                let numbering = if *ordered {
                    DECIMAL_NUMBERING
                } else {
                    BULLET_NUMBERING
                };
                let mut p = docx_rs::Paragraph::new().numbering(
                    NumberingId::new(numbering),
                    IndentLevel::new(*level as usize),
                );
                for run in runs {
                    p = p.add_run(text_run(run));
                }
                docx.add_paragraph(p)
            }
            Block::Rule => docx.add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯"))
                    .align(AlignmentType::Center),
            ),
            Block::Table(table) => docx.add_table(encode_table(table)),
            Block::PageBreak => docx.add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_break(BreakType::Page)),
            ),
        }
    }
}

impl Default for DocxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading font sizes in half-points, following the document stylesheet.
fn heading_size(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 56,
        HeadingLevel::H2 => 48,
        HeadingLevel::H3 => 40,
        _ => 32,
    }
}

fn heading_paragraph(level: HeadingLevel, runs: &[TextRun]) -> docx_rs::Paragraph {
    let size = heading_size(level);
    let mut p = docx_rs::Paragraph::new();
    for run in runs {
        p = p.add_run(text_run(run).bold().size(size));
    }
    p
}

fn body_paragraph(para: &Paragraph) -> docx_rs::Paragraph {
    let mut p = docx_rs::Paragraph::new();
    if para.alignment == TextAlignment::Justify {
        p = p.align(AlignmentType::Justified);
    }
    if para.indent_level > 0 {
        p = p.indent(
            Some(INDENT_STEP * para.indent_level as i32),
            None,
            None,
            None,
        );
    }
    for run in &para.runs {
        p = p.add_run(text_run(run));
    }
    p
}

fn encode_table(table: &Table) -> docx_rs::Table {
    let rows: Vec<TableRow> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let header = table.has_header && i == 0;
            let cells: Vec<TableCell> = row
                .cells
                .iter()
                .map(|cell| {
                    let mut p = docx_rs::Paragraph::new();
                    for run in &cell.runs {
                        let mut r = text_run(run);
                        if header {
                            r = r.bold();
                        }
                        p = p.add_run(r);
                    }
                    TableCell::new().add_paragraph(p)
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();
    docx_rs::Table::new(rows)
}

/// Convert a model run to a docx run.
///
/// Hyperlinks become styled text; no relationship entries are written.
fn text_run(run: &TextRun) -> docx_rs::Run {
    let mut r = docx_rs::Run::new().add_text(run.text.as_str());
    if run.style.bold {
        r = r.bold();
    }
    if run.style.italic {
        r = r.italic();
    }
    if run.style.strikethrough {
        r = r.strike();
    }
    if run.style.code {
        r = r.fonts(RunFonts::new().ascii(CODE_FONT)).size(20);
    }
    if run.hyperlink.is_some() {
        r = r.color("0066CC").underline("single");
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextStyle;

    /// DOCX files are ZIP archives; check the magic.
    fn assert_is_zip(bytes: &[u8]) {
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_encode_empty_document() {
        let bytes = DocxEncoder::new().encode(&Document::new()).unwrap();
        assert_is_zip(&bytes);
    }

    #[test]
    fn test_encode_mixed_blocks() {
        let mut doc = Document::new();
        doc.add_block(Block::heading(HeadingLevel::H1, "Title"));
        doc.add_block(Block::Paragraph(Paragraph::justified("Body text.")));
        doc.add_block(Block::Code {
            language: Some("rust".to_string()),
            text: "fn main() {}\nfn other() {}".to_string(),
        });
        doc.add_block(Block::ListItem {
            ordered: true,
            number: Some(1),
            level: 0,
            runs: vec![TextRun::plain("first")],
        });
        doc.add_block(Block::PageBreak);
        doc.add_block(Block::Paragraph(Paragraph::with_text("After the break.")));

        let bytes = DocxEncoder::new().encode(&doc).unwrap();
        assert_is_zip(&bytes);
    }

    #[test]
    fn test_encode_styles_and_table() {
        let mut doc = Document::new();
        let mut para = Paragraph::new();
        para.add_run(TextRun::styled("bold", TextStyle::bold()));
        para.add_run(TextRun::link("site", "https://example.com"));
        doc.add_block(Block::Paragraph(para));

        let mut table = Table::new();
        table.has_header = true;
        table.rows.push(crate::model::Row::from_texts(["H1", "H2"]));
        table.rows.push(crate::model::Row::from_texts(["a", "b"]));
        doc.add_block(Block::Table(table));

        let bytes = DocxEncoder::new().encode(&doc).unwrap();
        assert_is_zip(&bytes);
    }
}
