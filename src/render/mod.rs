//! Output rendering for documents.
//!
//! Renders the block model to a styled HTML document, used for previews
//! and the CLI's `preview` subcommand.

mod html;
mod options;

pub use html::{to_html, to_html_fragment, wrap_html_document};
pub use options::RenderOptions;
