//! `index.xml` serializer.

use crate::error::Result;
use crate::model::{Block, StyleCatalogue};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::options::{DocumentHeader, SFA_NAMESPACE, SF_NAMESPACE, SL_NAMESPACE};

/// Escape the five XML reserved characters.
///
/// `&` is replaced first so entities produced for the other characters are
/// never escaped twice. Characters XML 1.0 does not allow at all (most C0
/// controls, U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(text: &str) -> String {
    if text.chars().all(is_xml_char) {
        return quick_xml::escape::escape(text).into_owned();
    }

    let allowed: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    quick_xml::escape::escape(&allowed).into_owned()
}

/// Whether `c` matches the XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Serialize blocks into a complete `index.xml` document.
///
/// The output depends only on the arguments; identical inputs always give
/// byte-identical text.
pub fn to_xml(blocks: &[Block], catalogue: &StyleCatalogue, header: &DocumentHeader) -> String {
    let mut output = String::new();

    render_header(&mut output, catalogue, header);

    for block in blocks {
        render_paragraph(&mut output, block, catalogue);
    }

    output.push_str("    </sl:section>\n");
    output.push_str("  </sl:body>\n");
    output.push_str("</sl:document>");

    output
}

fn render_header(output: &mut String, catalogue: &StyleCatalogue, header: &DocumentHeader) {
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<sl:document xmlns:sl=\"{}\" xmlns:sf=\"{}\" xmlns:sfa=\"{}\" version=\"{}\">\n",
        SL_NAMESPACE,
        SF_NAMESPACE,
        SFA_NAMESPACE,
        escape_xml(&header.version)
    ));

    output.push_str("  <sl:metadata>\n");
    output.push_str(&format!(
        "    <sl:author>{}</sl:author>\n",
        escape_xml(&header.author)
    ));
    output.push_str(&format!(
        "    <sl:creation-date>{}</sl:creation-date>\n",
        escape_xml(&header.creation_date)
    ));
    output.push_str("  </sl:metadata>\n");

    output.push_str("  <sl:styles>\n");
    for style in catalogue.styles() {
        output.push_str(&format!(
            "    <sl:paragraph-style sfa:ID=\"{}\" sf:name=\"{}\">\n",
            escape_xml(&style.reference()),
            escape_xml(&style.name)
        ));
        output.push_str(&format!(
            "      <sl:font sfa:fontName=\"{}\" sfa:fontSize=\"{}\"/>\n",
            escape_xml(&style.font_name),
            style.font_size
        ));
        output.push_str("    </sl:paragraph-style>\n");
    }
    output.push_str("  </sl:styles>\n");

    output.push_str("  <sl:body>\n");
    output.push_str("    <sl:section>\n");
    output.push_str(&format!(
        "      <sl:layout-style-ref sfa:IDref=\"{}\"/>\n",
        escape_xml(&header.layout_style)
    ));
}

fn render_paragraph(output: &mut String, block: &Block, catalogue: &StyleCatalogue) {
    let style_ref = catalogue
        .style_for(block.kind)
        .map(|style| style.reference())
        .unwrap_or_default();

    output.push_str(&format!(
        "      <sl:p sf:style=\"{}\">\n",
        escape_xml(&style_ref)
    ));
    output.push_str(&format!(
        "        <sf:text>{}</sf:text>\n",
        escape_xml(&block.display_text())
    ));
    output.push_str("      </sl:p>\n");
}

/// A paragraph read back from `index.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedParagraph {
    /// Value of the `sf:style` attribute
    pub style: String,
    /// Unescaped text payload
    pub text: String,
}

/// Read the paragraphs of a serialized document in order.
///
/// Fails if the document is not well-formed XML.
pub fn read_paragraphs(xml: &str) -> Result<Vec<RenderedParagraph>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut paragraphs = Vec::new();
    let mut current: Option<RenderedParagraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"sl:p" => {
                let style = e
                    .try_get_attribute("sf:style")
                    .map_err(quick_xml::Error::from)?
                    .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
                    .transpose()?
                    .unwrap_or_default();
                current = Some(RenderedParagraph {
                    style,
                    text: String::new(),
                });
            }
            Event::Start(e) if e.name().as_ref() == b"sf:text" => in_text = true,
            Event::Text(e) if in_text => {
                if let Some(ref mut para) = current {
                    para.text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) if e.name().as_ref() == b"sf:text" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"sl:p" => {
                if let Some(para) = current.take() {
                    paragraphs.push(para);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphStyle;

    fn render(blocks: &[Block]) -> String {
        to_xml(blocks, &StyleCatalogue::default(), &DocumentHeader::default())
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(
            escape_xml("<tag attr=\"v\">it's</tag>"),
            "&lt;tag attr=&quot;v&quot;&gt;it&apos;s&lt;/tag&gt;"
        );
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_drops_disallowed_chars() {
        assert_eq!(escape_xml("body\x0cnext"), "bodynext");
        assert_eq!(escape_xml("a\x00b\x01c\x1f&"), "abc&amp;");
        assert_eq!(escape_xml("tab\tline\nret\r"), "tab\tline\nret\r");
        assert_eq!(escape_xml("x\u{FFFE}y\u{FFFF}"), "xy");
        assert!(!is_xml_char('\u{B}'));
        assert!(is_xml_char('\u{1F600}'));
    }

    #[test]
    fn test_control_chars_never_reach_output() {
        let xml = render(&[Block::heading("PAGE ONE"), Block::body("body\x0cnext page")]);
        assert!(xml.chars().all(is_xml_char));

        let paragraphs = read_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs[1].text, "bodynext page");
    }

    #[test]
    fn test_heading_and_body_styles() {
        let xml = render(&[Block::heading("HELLO WORLD"), Block::body("This is body text.")]);

        let heading = xml.find("<sl:p sf:style=\"paragraph-style-1\">").unwrap();
        let body = xml.find("<sl:p sf:style=\"paragraph-style-0\">").unwrap();
        assert!(heading < body);
        assert!(xml.contains("<sf:text>HELLO WORLD</sf:text>"));
        assert!(xml.contains("<sf:text>This is body text.</sf:text>"));
        assert_eq!(xml.matches("<sl:p ").count(), 2);
    }

    #[test]
    fn test_title_and_bullet() {
        let xml = render(&[Block::title("Guide"), Block::bullet("step <1>")]);
        assert!(xml.contains(
            "      <sl:p sf:style=\"paragraph-style-2\">\n        <sf:text>Guide</sf:text>"
        ));
        assert!(xml.contains(
            "      <sl:p sf:style=\"paragraph-style-0\">\n        <sf:text>• step &lt;1&gt;</sf:text>"
        ));
    }

    #[test]
    fn test_header_and_styles() {
        let xml = render(&[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sl:document "));
        assert!(xml.contains("version=\"72028102400000000\""));
        assert!(xml.contains("<sl:author>Pages Converter</sl:author>"));
        assert!(xml.contains("<sl:creation-date>2024-01-01T12:00:00Z</sl:creation-date>"));
        assert!(xml.contains(
            "<sl:paragraph-style sfa:ID=\"paragraph-style-2\" sf:name=\"Title\">\n      <sl:font sfa:fontName=\"Helvetica-Bold\" sfa:fontSize=\"24\"/>"
        ));
        assert!(xml.contains("<sl:layout-style-ref sfa:IDref=\"layout-style-0\"/>"));
        assert!(xml.ends_with("    </sl:section>\n  </sl:body>\n</sl:document>"));
    }

    #[test]
    fn test_title_without_title_style() {
        let catalogue = StyleCatalogue::new(vec![
            ParagraphStyle::new(0, "Body", "Helvetica", 12),
            ParagraphStyle::new(1, "Heading", "Helvetica-Bold", 18),
        ]);
        let xml = to_xml(&[Block::title("T")], &catalogue, &DocumentHeader::default());
        assert!(xml.contains("<sl:p sf:style=\"paragraph-style-1\">"));
        assert!(!xml.contains("sf:name=\"Title\""));
    }

    #[test]
    fn test_deterministic_output() {
        let blocks = vec![Block::title("A"), Block::body("b & c")];
        assert_eq!(render(&blocks), render(&blocks));
    }

    #[test]
    fn test_read_paragraphs_roundtrip() {
        let original = "Fish & chips <b>\"quoted\"</b> it's > 3";
        let xml = render(&[Block::heading("HI"), Block::body(original)]);

        let paragraphs = read_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].style, "paragraph-style-1");
        assert_eq!(paragraphs[1].style, "paragraph-style-0");
        assert_eq!(paragraphs[1].text, original);
    }

    #[test]
    fn test_read_paragraphs_rejects_malformed() {
        assert!(read_paragraphs("<sl:p><sf:text>x</sl:p>").is_err());
    }

    #[test]
    fn test_header_values_escaped() {
        let header = DocumentHeader::new().with_author("Smith & \"Sons\"");
        let xml = to_xml(&[], &StyleCatalogue::default(), &header);
        assert!(xml.contains("<sl:author>Smith &amp; &quot;Sons&quot;</sl:author>"));
    }
}
