//! Plain-text paragraph segmentation.

use crate::model::Block;

/// Paragraphs at or above this many characters are never headings.
const MAX_HEADING_CHARS: usize = 100;

/// Split plain text into blocks.
///
/// Paragraphs are separated by two or more consecutive line breaks. Short
/// all-caps paragraphs become headings; everything else is body text.
pub fn parse_text(content: &str) -> Vec<Block> {
    let normalized = content.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| {
            if is_heading(para) {
                Block::heading(para)
            } else {
                Block::body(para)
            }
        })
        .collect()
}

/// A paragraph is a heading when it is entirely upper case and short.
///
/// "Entirely upper case" requires at least one cased character and no
/// lower-case ones, so digits and punctuation alone do not qualify.
pub fn is_heading(para: &str) -> bool {
    let mut has_upper = false;
    for c in para.chars() {
        if c.is_lowercase() {
            return false;
        }
        has_upper |= c.is_uppercase();
    }
    has_upper && para.chars().count() < MAX_HEADING_CHARS
}
