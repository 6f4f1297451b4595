//! Markdown source parsing.

use pulldown_cmark::{html, Options, Parser};

use super::html::blocks_from_html;
use crate::model::Block;

/// Render CommonMark Markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Parse Markdown into blocks via its rendered HTML.
pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    let html = markdown_to_html(markdown);
    blocks_from_html(&html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_heading_mapping() {
        let blocks = parse_markdown("# Title\n\n## Sub\n\n### Minor\n");
        assert_eq!(
            blocks,
            vec![
                Block::title("Title"),
                Block::heading("Sub"),
                Block::heading("Minor"),
            ]
        );
    }

    #[test]
    fn test_bullet_list() {
        let blocks = parse_markdown("- apples\n- pears\n");
        assert_eq!(blocks, vec![Block::bullet("apples"), Block::bullet("pears")]);
        assert_eq!(blocks[0].display_text(), "• apples");
    }

    #[test]
    fn test_empty_list_item_then_paragraph() {
        let blocks = parse_markdown("- one\n-\n\nafter\n");
        assert_eq!(blocks, vec![Block::bullet("one"), Block::body("after")]);
    }

    #[test]
    fn test_ordered_list_is_bullet() {
        let blocks = parse_markdown("1. first\n2. second\n");
        assert!(blocks.iter().all(|b| b.kind == BlockKind::BulletItem));
    }

    #[test]
    fn test_emphasis_stripped() {
        let blocks = parse_markdown("Some **bold** and *italic* text.");
        assert_eq!(blocks, vec![Block::body("Some bold and italic text.")]);
    }

    #[test]
    fn test_bold_only_paragraph_is_body() {
        let blocks = parse_markdown("**Note:** read this");
        assert_eq!(blocks, vec![Block::body("Note: read this")]);
    }

    #[test]
    fn test_inline_html_dropped() {
        let blocks = parse_markdown("Tom & Jerry say \"<hi>\"");
        assert_eq!(blocks, vec![Block::body("Tom & Jerry say \"\"")]);
    }

    #[test]
    fn test_escaped_angle_brackets_kept() {
        let blocks = parse_markdown("a \\<b\\> c & d");
        assert_eq!(blocks, vec![Block::body("a <b> c & d")]);
    }

    #[test]
    fn test_mixed_document() {
        let md = "# Report\n\nIntro paragraph.\n\n## Findings\n\n- one\n- two\n\nClosing.\n";
        let kinds: Vec<_> = parse_markdown(md).iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Title,
                BlockKind::Body,
                BlockKind::Heading,
                BlockKind::BulletItem,
                BlockKind::BulletItem,
                BlockKind::Body,
            ]
        );
    }
}
