//! XML-to-text transformation for WordprocessingML parts.
//!
//! Walks one part's content tree in document order and translates the
//! structural vocabulary into text: text runs are appended literally, tabs
//! and breaks become their character equivalents, and paragraphs become
//! blank-line boundaries. Everything else is traversed but contributes
//! nothing.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// The WordprocessingML main namespace, resolved at parse setup.
const WML_NS: Namespace<'static> =
    Namespace(b"http://schemas.openxmlformats.org/wordprocessingml/2006/main");

/// Convert one XML part to a single accumulated string.
///
/// Page-type breaks are treated like line breaks; use [`xml_to_pages`] for
/// page-segmented output.
pub fn xml_to_text(xml: &str) -> Result<String> {
    let mut segments = walk(xml, false)?;
    Ok(segments.pop().unwrap_or_default())
}

/// Convert one XML part to page segments.
///
/// Each page-type break ends the current segment; the trailing accumulator
/// is always appended as the last segment, so a part containing N page
/// breaks yields N+1 segments. Segments are returned untrimmed.
pub fn xml_to_pages(xml: &str) -> Result<Vec<String>> {
    walk(xml, true)
}

/// Single forward pass over every descendant node of the part.
fn walk(xml: &str, split_pages: bool) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    // Preserve whitespace from xml:space="preserve" runs
    reader.config_mut().trim_text(false);

    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(ref e))) => {
                if bound_to_wml(&ns) {
                    if e.local_name().as_ref() == b"t" {
                        in_text = true;
                    } else {
                        apply_marker(e, split_pages, &mut segments, &mut current);
                    }
                }
            }
            Ok((ns, Event::Empty(ref e))) => {
                // Self-closing <w:t/> carries no text; the markers behave
                // the same as in open form
                if bound_to_wml(&ns) && e.local_name().as_ref() != b"t" {
                    apply_marker(e, split_pages, &mut segments, &mut current);
                }
            }
            Ok((_, Event::Text(ref e))) => {
                if in_text {
                    current.push_str(&e.unescape()?);
                }
            }
            Ok((ns, Event::End(ref e))) => {
                if bound_to_wml(&ns) && e.local_name().as_ref() == b"t" {
                    in_text = false;
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    segments.push(current);
    Ok(segments)
}

/// Translate a structural element into its text equivalent.
fn apply_marker(
    e: &BytesStart,
    split_pages: bool,
    segments: &mut Vec<String>,
    current: &mut String,
) {
    match e.local_name().as_ref() {
        b"tab" => current.push('\t'),
        b"br" => {
            if split_pages && is_page_break(e) {
                segments.push(std::mem::take(current));
            } else {
                current.push('\n');
            }
        }
        b"cr" => current.push('\n'),
        // Paragraph boundary; the marker lands before the paragraph's own
        // runs because the element starts ahead of its descendants
        b"p" => current.push_str("\n\n"),
        _ => {}
    }
}

/// Check whether a break element carries a page type attribute.
fn is_page_break(e: &BytesStart) -> bool {
    e.attributes()
        .flatten()
        .any(|attr| attr.key.local_name().as_ref() == b"type" && attr.value.as_ref() == b"page")
}

fn bound_to_wml(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(bound) if *bound == WML_NS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wml(body: &str) -> String {
        format!(
            "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}</w:body></w:document>",
            body
        )
    }

    #[test]
    fn test_single_paragraph() {
        let xml = wml("<w:p><w:r><w:t>Hello</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\nHello");
    }

    #[test]
    fn test_two_paragraphs() {
        let xml = wml("<w:p><w:r><w:t>One</w:t></w:r></w:p><w:p><w:r><w:t>Two</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\nOne\n\nTwo");
    }

    #[test]
    fn test_tab() {
        let xml = wml("<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\na\tb");
    }

    #[test]
    fn test_line_and_carriage_breaks() {
        let xml = wml("<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:cr/><w:t>c</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\na\nb\nc");
    }

    #[test]
    fn test_page_break_without_split_is_newline() {
        let xml = wml("<w:p><w:r><w:t>a</w:t><w:br w:type=\"page\"/><w:t>b</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\na\nb");
    }

    #[test]
    fn test_page_break_splits_segments() {
        let xml = wml("<w:p><w:r><w:t>a</w:t><w:br w:type=\"page\"/><w:t>b</w:t></w:r></w:p>");
        assert_eq!(xml_to_pages(&xml).unwrap(), vec!["\n\na", "b"]);
    }

    #[test]
    fn test_trailing_accumulator_is_last_segment() {
        // two page breaks, nothing after the second: three segments
        let xml = wml(
            "<w:p><w:r><w:t>a</w:t><w:br w:type=\"page\"/><w:t>b</w:t>\
             <w:br w:type=\"page\"/></w:r></w:p>",
        );
        assert_eq!(xml_to_pages(&xml).unwrap(), vec!["\n\na", "b", ""]);
    }

    #[test]
    fn test_typed_line_break_is_not_a_page_boundary() {
        let xml = wml("<w:p><w:r><w:t>a</w:t><w:br w:type=\"textWrapping\"/><w:t>b</w:t></w:r></w:p>");
        assert_eq!(xml_to_pages(&xml).unwrap(), vec!["\n\na\nb"]);
    }

    #[test]
    fn test_empty_part_yields_one_empty_segment() {
        let xml = wml("");
        assert_eq!(xml_to_pages(&xml).unwrap(), vec![""]);
        assert_eq!(xml_to_text(&xml).unwrap(), "");
    }

    #[test]
    fn test_foreign_namespace_is_traversed_but_silent() {
        let xml = "<w:document \
                   xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
                   xmlns:x=\"urn:example:other\">\
                   <w:p><w:r><w:t>keep</w:t></w:r><x:t>drop</x:t><x:tab/></w:p>\
                   </w:document>";
        assert_eq!(xml_to_text(xml).unwrap(), "\n\nkeep");
    }

    #[test]
    fn test_preserved_whitespace() {
        let xml = wml("<w:p><w:r><w:t xml:space=\"preserve\">  spaced  </w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\n  spaced  ");
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = wml("<w:p><w:r><w:t>a &amp; b &lt;c&gt;</w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\na & b <c>");
    }

    #[test]
    fn test_empty_text_run() {
        let xml = wml("<w:p><w:r><w:t/></w:r><w:r><w:t></w:t></w:r></w:p>");
        assert_eq!(xml_to_text(&xml).unwrap(), "\n\n");
    }

    #[test]
    fn test_malformed_xml() {
        let err = xml_to_text("<w:document><w:p></w:document>").unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)));
    }
}
