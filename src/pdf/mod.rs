//! PDF parsing: text extraction and layout reconstruction.
//!
//! This is the local ("basic") conversion path. Text fragments are pulled
//! out of each page's content stream with their drawn position and font
//! metadata, then [`layout`] rebuilds visual lines and classifies them
//! into headings, list paragraphs, and body paragraphs. The result is
//! approximate; there is no layout engine behind it.

pub mod extract;
pub mod layout;

use crate::error::{Error, Result};
use crate::model::Document;
use std::path::Path;

/// A single run of extracted text with position and font metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// The drawn text
    pub text: String,
    /// Horizontal coordinate of the text anchor
    pub x: f32,
    /// Baseline vertical coordinate (larger y is higher on the page)
    pub y: f32,
    /// Nominal font size in text-space units
    pub font_size: f32,
    /// Font name, used only to detect boldness
    pub font_name: String,
}

impl TextFragment {
    /// Create a fragment.
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            font_name: font_name.into(),
        }
    }

    /// Whether the font name carries a bold-like marker.
    pub fn is_bold(&self) -> bool {
        let name = self.font_name.to_ascii_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }
}

/// Parser for PDF documents.
pub struct PdfParser {
    doc: lopdf::Document,
    source: Option<String>,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = lopdf::Document::load(path)?;
        Ok(Self {
            doc,
            source: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
        })
    }

    /// Open a PDF from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = lopdf::Document::load_mem(data)?;
        Ok(Self { doc, source: None })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract text fragments for every page, in page order.
    ///
    /// Any failure while reading a page aborts the whole extraction;
    /// there is no partial result.
    pub fn extract_fragments(&self) -> Result<Vec<Vec<TextFragment>>> {
        let pages = self.doc.get_pages();
        if pages.is_empty() {
            return Err(Error::PdfParse("document has no pages".to_string()));
        }

        let mut result = Vec::with_capacity(pages.len());
        for (page_number, page_id) in pages {
            let fragments = extract::extract_page(&self.doc, page_id).map_err(|e| {
                Error::PdfParse(format!("page {page_number}: {e}"))
            })?;
            log::debug!(
                "page {}: extracted {} fragments",
                page_number,
                fragments.len()
            );
            result.push(fragments);
        }
        Ok(result)
    }

    /// Parse the document into the block model via layout reconstruction.
    pub fn parse(&self) -> Result<Document> {
        let pages = self.extract_fragments()?;
        let mut doc = layout::reconstruct_document(&pages);
        doc.source = self.source.clone();
        Ok(doc)
    }
}
