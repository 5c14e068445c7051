//! Line reconstruction from positioned text fragments.
//!
//! Fragments are bucketed into visual lines by vertical proximity, ordered
//! top-to-bottom and left-to-right, and each line is classified as a
//! heading, list paragraph, or body paragraph from its font metrics.

use super::TextFragment;
use crate::model::{Block, Document, HeadingLevel, Paragraph};
use regex::Regex;
use std::sync::OnceLock;

/// Fragments within this vertical distance of a line's first fragment
/// belong to that line.
pub const LINE_TOLERANCE: f32 = 5.0;

/// Lines with a font size above this become level-3 headings.
pub const HEADING_SIZE: f32 = 16.0;

/// Lines with a font size above this (or any bold fragment) become
/// level-4 headings.
pub const SUBHEADING_SIZE: f32 = 14.0;

/// Leading enumerator: a number followed by `.` or `)`, or a `-`/`*`
/// bullet, then whitespace.
fn enumerator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:\d+[.)]|[-*])\s").expect("valid regex"))
}

/// A reconstructed visual line.
#[derive(Debug, Clone)]
pub struct Line {
    /// Fragments in left-to-right order
    pub fragments: Vec<TextFragment>,
    /// Vertical anchor: the y of the line's first-arrived fragment
    pub y: f32,
}

impl Line {
    /// Concatenated, trimmed text of the line.
    pub fn text(&self) -> String {
        let joined: String = self
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        joined.trim().to_string()
    }

    /// Maximum font size across the line's fragments.
    pub fn max_font_size(&self) -> f32 {
        self.fragments
            .iter()
            .map(|f| f.font_size)
            .fold(0.0, f32::max)
    }

    /// Whether any fragment in the line is bold.
    pub fn has_bold(&self) -> bool {
        self.fragments.iter().any(TextFragment::is_bold)
    }
}

/// Classification of a reconstructed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Level-3 heading (large font)
    Heading3,
    /// Level-4 heading (medium font or bold)
    Heading4,
    /// Indented paragraph starting with a bullet or number
    ListParagraph,
    /// Plain justified paragraph
    BodyParagraph,
}

/// Group fragments into visual lines.
///
/// A fragment joins the current line when its y differs from the line's
/// *first* fragment by less than [`LINE_TOLERANCE`]; otherwise a new line
/// starts. Grouping is order-sensitive: fragments are taken in the
/// extractor's native order, not position-sorted first. After grouping,
/// lines are sorted top-to-bottom (descending y) and fragments within a
/// line left-to-right (ascending x).
pub fn group_lines(fragments: &[TextFragment]) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    for frag in fragments {
        match lines.last_mut() {
            Some(line) if (frag.y - line.y).abs() < LINE_TOLERANCE => {
                line.fragments.push(frag.clone());
            }
            _ => {
                lines.push(Line {
                    y: frag.y,
                    fragments: vec![frag.clone()],
                });
            }
        }
    }

    lines.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));
    for line in &mut lines {
        line.fragments
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }
    lines
}

/// Classify a line. Returns `None` for lines that are empty after
/// trimming; those contribute no output.
pub fn classify_line(line: &Line) -> Option<(LineKind, String)> {
    let text = line.text();
    if text.is_empty() {
        return None;
    }

    let kind = if line.max_font_size() > HEADING_SIZE {
        LineKind::Heading3
    } else if line.max_font_size() > SUBHEADING_SIZE || line.has_bold() {
        LineKind::Heading4
    } else if enumerator_pattern().is_match(&text) {
        LineKind::ListParagraph
    } else {
        LineKind::BodyParagraph
    };
    Some((kind, text))
}

/// Reconstruct one page of fragments into content blocks.
pub fn page_to_blocks(fragments: &[TextFragment]) -> Vec<Block> {
    group_lines(fragments)
        .iter()
        .filter_map(classify_line)
        .map(|(kind, text)| match kind {
            LineKind::Heading3 => Block::heading(HeadingLevel::H3, text),
            LineKind::Heading4 => Block::heading(HeadingLevel::H4, text),
            LineKind::ListParagraph => Block::Paragraph(Paragraph::indented(text, 1)),
            LineKind::BodyParagraph => Block::Paragraph(Paragraph::justified(text)),
        })
        .collect()
}

/// Reconstruct a whole document from per-page fragment sequences.
///
/// Pages are emitted in order with a page-number heading per page and a
/// page break between consecutive pages.
pub fn reconstruct_document(pages: &[Vec<TextFragment>]) -> Document {
    let mut doc = Document::new();
    doc.page_count = Some(pages.len());

    for (i, fragments) in pages.iter().enumerate() {
        if i > 0 {
            doc.add_block(Block::PageBreak);
        }
        doc.add_block(Block::heading(HeadingLevel::H2, format!("Page {}", i + 1)));
        for block in page_to_blocks(fragments) {
            doc.add_block(block);
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32, size: f32) -> TextFragment {
        TextFragment::new(text, x, y, size, "Helvetica")
    }

    fn bold_frag(text: &str, x: f32, y: f32, size: f32) -> TextFragment {
        TextFragment::new(text, x, y, size, "Helvetica-Bold")
    }

    #[test]
    fn test_tolerance_band_grouping() {
        // Fragments within the band group into one line regardless of
        // arrival order inside that band.
        let fragments = vec![
            frag("world", 100.0, 702.0, 12.0),
            frag("hello ", 10.0, 700.0, 12.0),
            frag("!", 200.0, 698.5, 12.0),
        ];
        let lines = group_lines(&fragments);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].fragments.len(), 3);
    }

    #[test]
    fn test_fragment_outside_band_starts_new_line() {
        let fragments = vec![
            frag("line one", 10.0, 700.0, 12.0),
            frag("line two", 10.0, 680.0, 12.0),
        ];
        let lines = group_lines(&fragments);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_lines_sorted_top_to_bottom() {
        // Extraction order bottom-up; output must be top-down.
        let fragments = vec![
            frag("bottom", 10.0, 100.0, 12.0),
            frag("top", 10.0, 700.0, 12.0),
            frag("middle", 10.0, 400.0, 12.0),
        ];
        let lines = group_lines(&fragments);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn test_fragments_sorted_left_to_right() {
        let fragments = vec![
            frag("world", 120.0, 500.0, 12.0),
            frag("hello", 10.0, 500.0, 12.0),
        ];
        let lines = group_lines(&fragments);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "helloworld");
    }

    #[test]
    fn test_classification_by_font_size() {
        let line = |f: Vec<TextFragment>| Line {
            y: f[0].y,
            fragments: f,
        };

        let (kind, _) = classify_line(&line(vec![frag("Title", 0.0, 0.0, 18.0)])).unwrap();
        assert_eq!(kind, LineKind::Heading3);

        let (kind, _) = classify_line(&line(vec![frag("Subtitle", 0.0, 0.0, 15.0)])).unwrap();
        assert_eq!(kind, LineKind::Heading4);

        let (kind, _) = classify_line(&line(vec![bold_frag("Bold", 0.0, 0.0, 12.0)])).unwrap();
        assert_eq!(kind, LineKind::Heading4);

        let (kind, _) = classify_line(&line(vec![frag("Body", 0.0, 0.0, 12.0)])).unwrap();
        assert_eq!(kind, LineKind::BodyParagraph);
    }

    #[test]
    fn test_enumerator_beats_body_not_heading() {
        // "1. Introduction" at body size is a list paragraph, not a heading.
        let line = Line {
            y: 0.0,
            fragments: vec![frag("1. Introduction", 0.0, 0.0, 12.0)],
        };
        let (kind, text) = classify_line(&line).unwrap();
        assert_eq!(kind, LineKind::ListParagraph);
        assert_eq!(text, "1. Introduction");

        // But a large enumerated line is still a heading: size wins first.
        let line = Line {
            y: 0.0,
            fragments: vec![frag("1. Introduction", 0.0, 0.0, 18.0)],
        };
        let (kind, _) = classify_line(&line).unwrap();
        assert_eq!(kind, LineKind::Heading3);
    }

    #[test]
    fn test_bullet_enumerators() {
        for text in ["- item", "* item", "3) item"] {
            let line = Line {
                y: 0.0,
                fragments: vec![frag(text, 0.0, 0.0, 12.0)],
            };
            let (kind, _) = classify_line(&line).unwrap();
            assert_eq!(kind, LineKind::ListParagraph, "for {text:?}");
        }
        // No trailing whitespace after the marker: not an enumerator.
        let line = Line {
            y: 0.0,
            fragments: vec![frag("-item", 0.0, 0.0, 12.0)],
        };
        let (kind, _) = classify_line(&line).unwrap();
        assert_eq!(kind, LineKind::BodyParagraph);
    }

    #[test]
    fn test_whitespace_line_dropped() {
        let line = Line {
            y: 0.0,
            fragments: vec![frag("   ", 0.0, 0.0, 12.0), frag("\t", 50.0, 1.0, 12.0)],
        };
        assert!(classify_line(&line).is_none());

        let blocks = page_to_blocks(&[frag("  ", 0.0, 700.0, 12.0)]);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_two_page_assembly() {
        let pages = vec![
            vec![frag("first page text", 10.0, 700.0, 12.0)],
            vec![frag("second page text", 10.0, 700.0, 12.0)],
        ];
        let doc = reconstruct_document(&pages);

        let breaks = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count();
        assert_eq!(breaks, 1);

        let page_headings: Vec<String> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, runs } if *level == HeadingLevel::H2 => {
                    Some(runs.iter().map(|r| r.text.as_str()).collect())
                }
                _ => None,
            })
            .collect();
        assert_eq!(page_headings, vec!["Page 1", "Page 2"]);
        assert_eq!(doc.page_count, Some(2));
    }

    #[test]
    fn test_mixed_page_classification() {
        let fragments = vec![
            frag("Report Title", 10.0, 700.0, 20.0),
            frag("Section A", 10.0, 650.0, 15.0),
            frag("Plain body text here.", 10.0, 600.0, 11.0),
            frag("2. Second point", 10.0, 560.0, 11.0),
        ];
        let blocks = page_to_blocks(&fragments);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(
            blocks[0],
            Block::Heading {
                level: HeadingLevel::H3,
                ..
            }
        ));
        assert!(matches!(
            blocks[1],
            Block::Heading {
                level: HeadingLevel::H4,
                ..
            }
        ));
        assert!(
            matches!(&blocks[2], Block::Paragraph(p) if p.alignment == crate::model::TextAlignment::Justify)
        );
        assert!(matches!(&blocks[3], Block::Paragraph(p) if p.indent_level == 1));
    }
}
