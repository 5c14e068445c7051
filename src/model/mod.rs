//! Document model produced by the Markdown and PDF front ends and
//! consumed by the HTML and DOCX back ends.

mod document;
mod paragraph;
mod table;

pub use document::{Block, Document};
pub use paragraph::{HeadingLevel, Paragraph, TextAlignment, TextRun, TextStyle};
pub use table::{Cell, Row, Table};
