//! Line-oriented walker over rendered Markdown HTML.
//!
//! Each line is split into tags and text. The first block-level tag on a line
//! decides the block kind; all remaining markup is dropped and the text
//! between tags is kept with entities resolved.

use crate::model::{Block, BlockKind};

/// Tags that only wrap other blocks and never decide a kind themselves.
const CONTAINER_TAGS: &[&str] = &[
    "ul", "ol", "blockquote", "div", "section", "table", "thead", "tbody", "tr",
];

/// Block-level tags that decide the kind of the line they start.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "li", "p", "pre", "td", "th", "dt", "dd", "hr",
];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open(&'a str),
    Close(&'a str),
    Text(&'a str),
}

/// Convert rendered HTML into blocks.
pub fn blocks_from_html(html: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    // Set by a loose list item whose text starts on a later line.
    let mut pending_item = false;

    for line in html.lines() {
        let tokens = tokenize(line);
        let tag_kind = classify(&tokens);
        let text = line_text(&tokens);

        if text.is_empty() {
            if tag_kind == Some(BlockKind::BulletItem) {
                // `<li></li>` is an empty item, not the start of a loose one
                pending_item = !closes_item(&tokens);
            } else if closes_item(&tokens) {
                pending_item = false;
            }
            continue;
        }

        let kind = match tag_kind {
            Some(kind) if kind != BlockKind::Body => kind,
            _ if pending_item => BlockKind::BulletItem,
            _ => BlockKind::Body,
        };
        pending_item = false;
        blocks.push(Block::new(kind, text));
    }

    blocks
}

/// Kind chosen by the first block-level tag on the line, if any.
fn classify(tokens: &[Token<'_>]) -> Option<BlockKind> {
    tokens.iter().find_map(|token| {
        let Token::Open(name) = token else {
            return None;
        };
        if CONTAINER_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
            return None;
        }
        if !BLOCK_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
            return None;
        }
        let kind = match name.to_ascii_lowercase().as_str() {
            "h1" => BlockKind::Title,
            "h2" | "h3" => BlockKind::Heading,
            "li" => BlockKind::BulletItem,
            _ => BlockKind::Body,
        };
        Some(kind)
    })
}

fn closes_item(tokens: &[Token<'_>]) -> bool {
    tokens
        .iter()
        .any(|t| matches!(t, Token::Close(name) if name.eq_ignore_ascii_case("li")))
}

/// Concatenated, entity-resolved text of a line with all tags removed.
fn line_text(tokens: &[Token<'_>]) -> String {
    let mut raw = String::new();
    for token in tokens {
        if let Token::Text(text) = token {
            raw.push_str(text);
        }
    }

    let text = match quick_xml::escape::unescape(&raw) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => raw,
    };
    text.trim().to_string()
}

/// Split one line into tags and text runs.
///
/// A `<` that does not start a well-formed tag is kept as text.
fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };

        if let Some((tag, len)) = parse_tag(&rest[start..]) {
            if start > 0 {
                tokens.push(Token::Text(&rest[..start]));
            }
            if let Some(tag) = tag {
                tokens.push(tag);
            }
            rest = &rest[start + len..];
        } else {
            // Not a tag: emit everything through the '<' as text.
            tokens.push(Token::Text(&rest[..start + 1]));
            rest = &rest[start + 1..];
        }
    }

    tokens
}

/// Parse a tag at the start of `s` (which begins with `<`).
///
/// Returns the token (`None` for comments and declarations) and the number
/// of bytes consumed, or `None` if `s` does not start with a tag.
fn parse_tag(s: &str) -> Option<(Option<Token<'_>>, usize)> {
    let after = &s[1..];

    if after.starts_with("!--") {
        let end = after.find("-->")?;
        return Some((None, end + 4));
    }

    let end = after.find('>')?;
    let inner = &after[..end];
    let consumed = end + 2;

    if inner.starts_with('!') || inner.starts_with('?') {
        return Some((None, consumed));
    }

    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = &body[..name_len];
    if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let token = if closing {
        Token::Close(name)
    } else {
        Token::Open(name)
    };
    Some((Some(token), consumed))
}
