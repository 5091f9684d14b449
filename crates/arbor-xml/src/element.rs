//! Element node data and typed value access.
//!
//! Elements are stored in a flat arena owned by [`Document`](crate::Document)
//! and reference each other by [`ElementId`]. The parent link is a plain
//! index, so upward navigation never creates an ownership cycle.

/// Handle to an element inside a [`Document`](crate::Document) arena.
///
/// Ids are only created by the document that owns the arena; using an id
/// with a different document is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Arena index of this element.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the XML tree.
///
/// Holds the tag name, optional text content, insertion-ordered attributes,
/// and the parent/child links. An absent `value` means "no text content",
/// which is distinct from an empty string: it selects the self-closing
/// serialized form.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) namespace_uri: Option<String>,
    pub(crate) qualified_name: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            value: None,
            attributes: Vec::new(),
            namespace_uri: None,
            qualified_name: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Tag name. Lookups compare names by exact, case-sensitive equality.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the text content.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Remove the text content (the element serializes as self-closing
    /// again if it has no children).
    pub fn clear_value(&mut self) {
        self.value = None;
    }

    /// Namespace URI carried for round-trip fidelity; never interpreted.
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Qualified (prefixed) tag name carried for round-trip fidelity.
    pub fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_deref()
    }

    /// Name used when serializing: the qualified (prefixed) name when one
    /// was recorded, otherwise the plain name.
    pub fn tag_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.name)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute. Keys are unique: writing an existing key replaces
    /// its value in place, keeping the original position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(pair) => pair.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(pos).1)
    }

    /// Parent element, or `None` for a root.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Text content, or the empty string when there is none.
    pub fn string(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// `true` iff the content equals `"true"` case-insensitively or parses
    /// as the integer `1`. Anything else, including no content, is `false`.
    pub fn as_bool(&self) -> bool {
        let s = self.string();
        s.eq_ignore_ascii_case("true") || s.parse::<i64>().map_or(false, |n| n == 1)
    }

    /// Content parsed as `i64`, or `0` when absent or unparseable.
    pub fn as_i64(&self) -> i64 {
        self.string().parse().unwrap_or(0)
    }

    /// Content parsed as `i32`, or `0` when absent or unparseable.
    pub fn as_i32(&self) -> i32 {
        self.string().parse().unwrap_or(0)
    }

    /// Content parsed as `u32`, or `0` when absent or unparseable.
    pub fn as_u32(&self) -> u32 {
        self.string().parse().unwrap_or(0)
    }

    /// Content parsed as `f64`, or `0.0` when absent or unparseable.
    pub fn as_f64(&self) -> f64 {
        self.string().parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with_value(value: Option<&str>) -> Element {
        let mut el = Element::new("test".to_string());
        el.value = value.map(str::to_string);
        el
    }

    #[test]
    fn test_string_defaults_to_empty() {
        assert_eq!(element_with_value(None).string(), "");
        assert_eq!(element_with_value(Some("text")).string(), "text");
    }

    #[test]
    fn test_bool_conversion() {
        assert!(element_with_value(Some("true")).as_bool());
        assert!(element_with_value(Some("TRUE")).as_bool());
        assert!(element_with_value(Some("1")).as_bool());
        assert!(!element_with_value(Some("false")).as_bool());
        assert!(!element_with_value(Some("0")).as_bool());
        assert!(!element_with_value(Some("yes")).as_bool());
        assert!(!element_with_value(None).as_bool());
    }

    #[test]
    fn test_numeric_conversions_default_on_failure() {
        assert_eq!(element_with_value(Some("42")).as_i64(), 42);
        assert_eq!(element_with_value(Some("-7")).as_i32(), -7);
        assert_eq!(element_with_value(Some("7")).as_u32(), 7);
        assert_eq!(element_with_value(Some("-7")).as_u32(), 0);
        assert_eq!(element_with_value(Some("3.25")).as_f64(), 3.25);
        assert_eq!(element_with_value(Some("not a number")).as_i64(), 0);
        assert_eq!(element_with_value(Some("not a number")).as_f64(), 0.0);
        assert_eq!(element_with_value(None).as_i64(), 0);
    }

    #[test]
    fn test_set_attr_last_write_wins() {
        let mut el = Element::new("test".to_string());
        el.set_attr("a", "1");
        el.set_attr("b", "2");
        el.set_attr("a", "3");

        assert_eq!(el.attr("a"), Some("3"));
        assert_eq!(el.attr("b"), Some("2"));
        assert_eq!(el.attributes().len(), 2);
        // Replacement keeps the original position
        assert_eq!(el.attributes()[0].0, "a");
    }

    #[test]
    fn test_remove_attr() {
        let mut el = Element::new("test".to_string());
        el.set_attr("key", "value");

        assert_eq!(el.remove_attr("key"), Some("value".to_string()));
        assert_eq!(el.attr("key"), None);
        assert_eq!(el.remove_attr("key"), None);
    }
}
