//! Paragraph style catalogue.

use serde::{Deserialize, Serialize};

use super::BlockKind;

/// A named paragraph style with its font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Numeric style id, rendered as `paragraph-style-{id}`
    pub id: u32,
    /// Style name (e.g., "Body")
    pub name: String,
    /// PostScript font name
    pub font_name: String,
    /// Font size in points
    pub font_size: u32,
}

impl ParagraphStyle {
    /// Create a new paragraph style.
    pub fn new(id: u32, name: impl Into<String>, font_name: impl Into<String>, font_size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            font_name: font_name.into(),
            font_size,
        }
    }

    /// Identifier used by `sfa:ID` and `sf:style` references.
    pub fn reference(&self) -> String {
        format!("paragraph-style-{}", self.id)
    }
}

/// Ordered, immutable set of paragraph styles referenced by blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCatalogue {
    styles: Vec<ParagraphStyle>,
}

impl Default for StyleCatalogue {
    fn default() -> Self {
        Self::new(vec![
            ParagraphStyle::new(0, "Body", "Helvetica", 12),
            ParagraphStyle::new(1, "Heading", "Helvetica-Bold", 18),
            ParagraphStyle::new(2, "Title", "Helvetica-Bold", 24),
        ])
    }
}

impl StyleCatalogue {
    /// Create a catalogue from an ordered list of styles.
    pub fn new(styles: Vec<ParagraphStyle>) -> Self {
        Self { styles }
    }

    /// All styles in declaration order.
    pub fn styles(&self) -> &[ParagraphStyle] {
        &self.styles
    }

    /// Find a style by name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&ParagraphStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Resolve the style used for a block kind.
    ///
    /// Titles fall back to the heading style when the catalogue has no
    /// "Title" entry; anything unresolved falls back to the first style.
    pub fn style_for(&self, kind: BlockKind) -> Option<&ParagraphStyle> {
        let resolved = match kind {
            BlockKind::Title => self.get("Title").or_else(|| self.get("Heading")),
            BlockKind::Heading => self.get("Heading"),
            BlockKind::Body | BlockKind::BulletItem => self.get("Body"),
        };
        resolved.or_else(|| self.styles.first())
    }
}
