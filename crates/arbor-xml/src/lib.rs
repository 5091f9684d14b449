//! In-memory XML document model.
//!
//! This crate holds a whole XML document as a mutable tree of named,
//! attributed, valued elements. Callers parse XML text into the tree,
//! navigate and query it (with lenient typed conversions on element
//! values), mutate it, and serialize it back to XML text in indented or
//! compact form.
//!
//! Elements live in a flat arena owned by [`Document`] and are addressed
//! by [`ElementId`] handles; parent links are plain indices, so upward
//! navigation is cheap and ownership stays a strict tree.
//!
//! # Example
//!
//! ```
//! use arbor_xml::{Document, Options};
//!
//! let mut doc = Document::new();
//! let root = doc.new_element("note", None, &[])?;
//! doc.set_root(root);
//! doc.add_child(root, "to", Some("Tove"), &[])?;
//! doc.add_child(root, "from", Some("Jani"), &[])?;
//!
//! let to = doc.first_child(root, "to").unwrap();
//! assert_eq!(doc.element(to).string(), "Tove");
//!
//! let text = doc.xml();
//! let parsed = Document::parse_str(&text, Options::strict())?;
//! assert_eq!(parsed.xml(), text);
//! # Ok::<(), arbor_xml::Error>(())
//! ```
//!
//! Namespace resolution, DTD/schema validation, and XPath are out of
//! scope; namespace fields are carried verbatim for round-trip fidelity
//! only. The tree has no built-in thread safety.

mod document;
mod element;
mod error;
mod parse;
mod serialize;

pub use document::{Document, Options};
pub use element::{Element, ElementId};
pub use error::{Error, Result};
pub use serialize::{escape, XML_DECLARATION};
