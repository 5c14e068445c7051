//! Document model structures.

use super::{HeadingLevel, Paragraph, Table, TextRun};
use serde::{Deserialize, Serialize};

/// A content block within a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A heading
    Heading {
        /// Heading level (h1-h6)
        level: HeadingLevel,
        /// Heading text runs
        runs: Vec<TextRun>,
    },
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A fenced code block
    Code {
        /// Language tag, when given
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Verbatim code text
        text: String,
    },
    /// A list item
    ListItem {
        /// Numbered list item (vs bulleted)
        ordered: bool,
        /// Item number for numbered lists
        #[serde(skip_serializing_if = "Option::is_none")]
        number: Option<u64>,
        /// Nesting level (0 = top level)
        level: u8,
        /// Item text runs
        runs: Vec<TextRun>,
    },
    /// A block quote paragraph
    Quote(Paragraph),
    /// A horizontal rule
    Rule,
    /// A table
    Table(Table),
    /// A page break
    PageBreak,
}

impl Block {
    /// Create a heading block with plain text.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Get the plain text content of this block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::ListItem { runs, .. } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
            Block::Paragraph(para) | Block::Quote(para) => para.plain_text(),
            Block::Code { text, .. } => text.clone(),
            Block::Table(table) => table.plain_text(),
            Block::Rule | Block::PageBreak => String::new(),
        }
    }
}

/// A parsed document, ready for rendering or encoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document title, when one could be derived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Source filename, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Number of source pages (PDF only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Content blocks in document order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of content blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Extract all text content as a single string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for block in &self.blocks {
            let t = block.plain_text();
            if !t.is_empty() {
                text.push_str(&t);
                text.push('\n');
            }
        }
        text.trim_end().to_string()
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
