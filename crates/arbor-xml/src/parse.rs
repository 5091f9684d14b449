//! Parse XML text into a document tree.
//!
//! The streaming parser is `quick_xml`; this module is the sink for its
//! event feed, building the tree through the same construction surface
//! callers use programmatically: a stack of open elements, one push per
//! start tag, text events setting the value of the innermost open element.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Document, ElementId, Error, Options, Result};

impl Document {
    /// Parse XML text into a document.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_xml::{Document, Options};
    ///
    /// let xml = r#"<?xml version="1.0"?>
    /// <note>
    ///     <to>Tove</to>
    ///     <from>Jani</from>
    /// </note>"#;
    ///
    /// let doc = Document::parse_str(xml, Options::strict()).unwrap();
    /// let root = doc.root().unwrap();
    /// let to = doc.first_child(root, "to").unwrap();
    /// assert_eq!(doc.element(to).string(), "Tove");
    /// ```
    pub fn parse_str(xml: &str, options: Options) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut doc = Document::with_options(options);
        let mut stack: Vec<ElementId> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = doc.push_from_tag(&e, stack.last().copied())?;
                    stack.push(id);
                }
                Ok(Event::Empty(e)) => {
                    // Self-closing element
                    doc.push_from_tag(&e, stack.last().copied())?;
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(e)) => {
                    if let Some(&current) = stack.last() {
                        let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                        if !text.trim().is_empty() {
                            doc.element_mut(current).set_value(text.into_owned());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // Ignore declarations, comments, processing instructions
                Err(e) => return Err(Error::Parse(e.to_string())),
            }
        }

        if doc.root().is_none() {
            return Err(Error::Parse("no root element found".to_string()));
        }
        Ok(doc)
    }

    /// Parse XML bytes into a document.
    pub fn parse_bytes(xml: &[u8], options: Options) -> Result<Self> {
        let xml = std::str::from_utf8(xml)?;
        Self::parse_str(xml, options)
    }

    /// Create an element from a start tag and attach it, either under the
    /// innermost open element or as the document root.
    ///
    /// A prefixed tag keeps the full name in `qualified_name` and the local
    /// part in `name`; no namespace resolution is performed.
    fn push_from_tag(
        &mut self,
        tag: &BytesStart<'_>,
        parent: Option<ElementId>,
    ) -> Result<ElementId> {
        let raw = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
        let (name, qualified) = match raw.split_once(':') {
            Some((_, local)) => (local.to_string(), Some(raw.as_str())),
            None => (raw.clone(), None),
        };

        let id = self.new_element_ns(name, None, None, qualified, &[])?;

        for attr in tag.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .into_owned();
            self.element_mut(id).set_attr(key, value);
        }

        match parent {
            Some(parent) => {
                self.append(parent, id);
            }
            None => {
                if self.root().is_some() {
                    return Err(Error::Parse("multiple root elements".to_string()));
                }
                self.set_root(id);
            }
        }
        Ok(id)
    }
}
