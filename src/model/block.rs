//! Block model: one classified unit of document content.

use serde::{Deserialize, Serialize};

/// Glyph placed in front of bullet item text when rendered.
pub const BULLET_GLYPH: &str = "•";

/// Kind of content block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Document title (Markdown `#`)
    Title,
    /// Section heading
    Heading,
    /// Regular body paragraph
    #[default]
    Body,
    /// Item of a bulleted or numbered list
    #[serde(rename = "bullet")]
    BulletItem,
}

/// A block of text in reading order.
///
/// The text is stored raw; XML escaping happens during serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block classification
    pub kind: BlockKind,
    /// Raw text content
    pub text: String,
}

impl Block {
    /// Create a block of the given kind.
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Create a title block.
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Title, text)
    }

    /// Create a heading block.
    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading, text)
    }

    /// Create a body paragraph block.
    pub fn body(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Body, text)
    }

    /// Create a bullet item block.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(BlockKind::BulletItem, text)
    }

    /// Text as it appears in the document, with the bullet glyph for list items.
    pub fn display_text(&self) -> String {
        match self.kind {
            BlockKind::BulletItem => format!("{} {}", BULLET_GLYPH, self.text),
            _ => self.text.clone(),
        }
    }
}

/// Join the display text of all blocks, one paragraph per line.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::display_text)
        .collect::<Vec<_>>()
        .join("\n")
}
