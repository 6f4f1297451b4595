//! Document model builders.
//!
//! Plain text is split into blank-line separated paragraphs. Markdown is
//! rendered to HTML first and then walked line by line.

pub mod html;
#[cfg(feature = "markdown")]
pub mod markdown;
pub mod text;

pub use crate::detect::SourceFormat;
pub use html::blocks_from_html;
#[cfg(feature = "markdown")]
pub use markdown::{markdown_to_html, parse_markdown};
pub use text::parse_text;

use crate::model::Block;

/// Build blocks from source text in the given format.
///
/// Without the `markdown` feature, Markdown sources are treated as plain text.
pub fn parse(content: &str, format: SourceFormat) -> Vec<Block> {
    let blocks = match format {
        SourceFormat::PlainText => parse_text(content),
        #[cfg(feature = "markdown")]
        SourceFormat::Markdown => parse_markdown(content),
        #[cfg(not(feature = "markdown"))]
        SourceFormat::Markdown => parse_text(content),
    };
    log::debug!("parsed {} blocks from {}", blocks.len(), format);
    blocks
}
