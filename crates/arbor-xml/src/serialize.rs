//! XML text output.
//!
//! Both renderers are pure functions of the tree. The compact form is
//! defined as a whitespace-stripping transform of the indented form, not a
//! second renderer, so the two can never disagree on content.

use std::borrow::Cow;

use crate::{Document, ElementId};

/// XML declaration emitted at the top of a serialized document.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Escape the five XML-reserved characters for embedding in text content
/// or attribute values. Tag and attribute names are never escaped.
///
/// `&` is substituted first so the ampersands introduced by the other four
/// entities are not escaped twice.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>' | b'\'' | b'"'))
    {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('\'', "&apos;")
            .replace('"', "&quot;"),
    )
}

fn strip_layout(xml: &str) -> String {
    xml.replace('\n', "").replace('\t', "")
}

impl Document {
    /// Serialize the whole document: XML declaration plus the indented root.
    pub fn xml(&self) -> String {
        match self.root() {
            Some(root) => format!("{}\n{}", XML_DECLARATION, self.xml_of(root)),
            None => XML_DECLARATION.to_string(),
        }
    }

    /// Compact form of [`Document::xml`]: the indented output with every
    /// newline and tab removed.
    pub fn xml_compact(&self) -> String {
        strip_layout(&self.xml())
    }

    /// Serialize one element (and its subtree) in indented form.
    ///
    /// Indentation is one tab per ancestor level, counted by parent links up
    /// to the tree root, so a nested element serialized on its own keeps its
    /// absolute depth. Elements with neither value nor children render
    /// self-closing (`<name />`); a value with no children renders inline
    /// (`<name>value</name>`, an empty string included); children render as
    /// an indented block.
    pub fn xml_of(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_element(&mut out, id, self.depth(id));
        out
    }

    /// Compact form of [`Document::xml_of`].
    pub fn xml_compact_of(&self, id: ElementId) -> String {
        strip_layout(&self.xml_of(id))
    }

    fn depth(&self, id: ElementId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.element(current).parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    fn write_element(&self, out: &mut String, id: ElementId, depth: usize) {
        let element = self.element(id);
        let tag = element.tag_name();

        for _ in 0..depth {
            out.push('\t');
        }
        out.push('<');
        out.push_str(tag);
        for (key, value) in element.attributes() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if element.children().is_empty() {
            match element.value() {
                None => out.push_str(" />"),
                Some(value) => {
                    out.push('>');
                    out.push_str(&escape(value));
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        } else {
            out.push_str(">\n");
            for &child in self.element(id).children() {
                self.write_element(out, child, depth + 1);
                out.push('\n');
            }
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_order_prevents_double_escaping() {
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("<>&'\""), "&lt;&gt;&amp;&apos;&quot;");
        assert_eq!(escape("plain text"), "plain text");
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_self_closing_vs_value_forms() {
        let mut doc = Document::new();
        let empty = doc.new_element("empty", None, &[]).unwrap();
        assert_eq!(doc.xml_of(empty), "<empty />");

        let valued = doc.new_element("v", Some("text"), &[]).unwrap();
        assert_eq!(doc.xml_of(valued), "<v>text</v>");

        // Empty string is a value, not an absence
        let blank = doc.new_element("b", Some(""), &[]).unwrap();
        assert_eq!(doc.xml_of(blank), "<b></b>");
    }

    #[test]
    fn test_indented_block_form() {
        let mut doc = Document::new();
        let root = doc.new_element("note", None, &[]).unwrap();
        doc.set_root(root);
        doc.add_child(root, "to", Some("Tove"), &[]).unwrap();
        let from = doc.add_child(root, "from", None, &[]).unwrap();
        doc.add_child(from, "name", Some("Jani"), &[]).unwrap();

        let expected = "<note>\n\
                        \t<to>Tove</to>\n\
                        \t<from>\n\
                        \t\t<name>Jani</name>\n\
                        \t</from>\n\
                        </note>";
        assert_eq!(doc.xml_of(root), expected);
    }

    #[test]
    fn test_subtree_keeps_absolute_depth() {
        let mut doc = Document::new();
        let root = doc.new_element("a", None, &[]).unwrap();
        doc.set_root(root);
        let b = doc.add_child(root, "b", None, &[]).unwrap();
        let c = doc.add_child(b, "c", Some("x"), &[]).unwrap();

        assert_eq!(doc.xml_of(c), "\t\t<c>x</c>");
    }

    #[test]
    fn test_attribute_escaping_and_order() {
        let mut doc = Document::new();
        let el = doc
            .new_element("tag", None, &[("first", "<>&'\""), ("second", "ok")])
            .unwrap();

        assert_eq!(
            doc.xml_of(el),
            "<tag first=\"&lt;&gt;&amp;&apos;&quot;\" second=\"ok\" />"
        );
    }

    #[test]
    fn test_qualified_name_round_trips() {
        let mut doc = Document::new();
        let el = doc
            .new_element_ns("local", None, None, Some("ns:local"), &[])
            .unwrap();

        assert_eq!(doc.xml_of(el), "<ns:local />");
    }

    #[test]
    fn test_compact_is_stripped_indented() {
        let mut doc = Document::new();
        let root = doc.new_element("note", None, &[]).unwrap();
        doc.set_root(root);
        doc.add_child(root, "to", Some("Tove"), &[]).unwrap();
        doc.add_child(root, "to", Some("Max"), &[]).unwrap();

        assert_eq!(
            doc.xml_compact_of(root),
            doc.xml_of(root).replace('\n', "").replace('\t', "")
        );
        assert_eq!(doc.xml_compact_of(root), "<note><to>Tove</to><to>Max</to></note>");
    }

    #[test]
    fn test_document_xml_includes_declaration() {
        let mut doc = Document::new();
        let root = doc.new_element("root", None, &[]).unwrap();
        doc.set_root(root);

        assert_eq!(
            doc.xml(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root />"
        );
        assert_eq!(
            doc.xml_compact(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><root />"
        );
    }
}
