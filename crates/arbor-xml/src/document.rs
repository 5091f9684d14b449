//! Document: the arena that owns the element tree.
//!
//! All navigation and mutation goes through [`Document`], which owns every
//! element and hands out [`ElementId`] handles. Parent links are arena
//! indices, so a detached subtree simply becomes a new root (`parent = None`)
//! while its own children stay attached to it.

use crate::{Element, ElementId, Error, Result};

/// Document-level configuration, threaded explicitly through the document
/// rather than read from ambient state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// When on, the simple-key lookup [`Document::get`] splits its key on
    /// `.` and resolves each segment in sequence. [`Document::get_path`]
    /// always splits, regardless of this flag.
    pub key_path_subscript: bool,
}

impl Options {
    /// Strict mode: simple keys are plain child names (default).
    pub fn strict() -> Self {
        Self {
            key_path_subscript: false,
        }
    }

    /// Lenient mode: simple keys are dotted key paths.
    pub fn lenient() -> Self {
        Self {
            key_path_subscript: true,
        }
    }
}

/// An XML document: element arena, root handle, and options.
///
/// Not thread-safe; share across threads only behind external locking.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    root: Option<ElementId>,
    options: Options,
}

impl Document {
    /// Create an empty document with default (strict) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            elements: Vec::new(),
            root: None,
            options,
        }
    }

    /// Document options.
    pub fn options(&self) -> Options {
        self.options
    }

    /// The document root, if one has been set.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Mark an element as the document root.
    pub fn set_root(&mut self, id: ElementId) {
        self.root = Some(id);
    }

    /// Borrow an element.
    ///
    /// Panics if `id` comes from a different document.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Mutably borrow an element.
    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    /// Number of elements in the arena, detached subtrees included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the arena holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ----- construction -----

    /// Create a rootless element.
    ///
    /// Fails with [`Error::InvalidName`] when `name` is empty.
    pub fn new_element(
        &mut self,
        name: impl Into<String>,
        value: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> Result<ElementId> {
        self.new_element_ns(name, value, None, None, attributes)
    }

    /// Create a rootless element carrying namespace round-trip fields.
    ///
    /// `namespace_uri` and `qualified_name` are stored verbatim and never
    /// interpreted; they exist so parsed documents serialize back the way
    /// they came in.
    pub fn new_element_ns(
        &mut self,
        name: impl Into<String>,
        value: Option<&str>,
        namespace_uri: Option<&str>,
        qualified_name: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> Result<ElementId> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }

        let mut element = Element::new(name);
        element.value = value.map(str::to_string);
        element.namespace_uri = namespace_uri.map(str::to_string);
        element.qualified_name = qualified_name.map(str::to_string);
        for (k, v) in attributes {
            element.set_attr(*k, *v);
        }

        let id = ElementId(self.elements.len() as u32);
        self.elements.push(element);
        Ok(id)
    }

    // ----- navigation -----

    /// First direct child of `id` whose name equals `name` exactly.
    pub fn first_child(&self, id: ElementId, name: &str) -> Option<ElementId> {
        self.element(id)
            .children
            .iter()
            .copied()
            .find(|&child| self.element(child).name == name)
    }

    /// Simple-key lookup. Resolves `key` as a dotted key path when the
    /// document's [`Options::key_path_subscript`] is on, otherwise as a
    /// plain child name.
    pub fn get(&self, id: ElementId, key: &str) -> Option<ElementId> {
        if self.options.key_path_subscript {
            self.get_path(id, key)
        } else {
            self.first_child(id, key)
        }
    }

    /// Key-path lookup: split `path` on `.` and resolve each segment as a
    /// child name against the previous result, stopping at the first
    /// segment that does not resolve.
    pub fn get_path(&self, id: ElementId, path: &str) -> Option<ElementId> {
        let mut current = id;
        for segment in path.split('.') {
            current = self.first_child(current, segment)?;
        }
        Some(current)
    }

    /// Every sibling of `id` (including `id` itself) sharing its name,
    /// in document order. A root returns just itself.
    pub fn all(&self, id: ElementId) -> Vec<ElementId> {
        match self.element(id).parent {
            None => vec![id],
            Some(parent) => {
                let name = &self.element(id).name;
                self.element(parent)
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| &self.element(child).name == name)
                    .collect()
            }
        }
    }

    /// First same-named sibling (self for a root).
    pub fn first(&self, id: ElementId) -> ElementId {
        self.all(id).first().copied().unwrap_or(id)
    }

    /// Last same-named sibling (self for a root).
    pub fn last(&self, id: ElementId) -> ElementId {
        self.all(id).last().copied().unwrap_or(id)
    }

    /// Number of same-named siblings, self included.
    pub fn count(&self, id: ElementId) -> usize {
        self.all(id).len()
    }

    /// Same-named siblings whose text content equals `value` exactly.
    pub fn all_with_value(&self, id: ElementId, value: &str) -> Vec<ElementId> {
        self.all(id)
            .into_iter()
            .filter(|&e| self.element(e).value.as_deref() == Some(value))
            .collect()
    }

    /// Same-named siblings carrying every key/value pair in `attributes`.
    /// Subset match: extra attributes on the candidate are permitted.
    pub fn all_with_attributes(
        &self,
        id: ElementId,
        attributes: &[(&str, &str)],
    ) -> Vec<ElementId> {
        self.all(id)
            .into_iter()
            .filter(|&e| {
                attributes
                    .iter()
                    .all(|(k, v)| self.element(e).attr(k) == Some(*v))
            })
            .collect()
    }

    /// Topmost ancestor reachable from `id` by parent links (`id` itself
    /// when it has no parent).
    pub fn top_ancestor(&self, id: ElementId) -> ElementId {
        let mut current = id;
        while let Some(parent) = self.element(current).parent {
            current = parent;
        }
        current
    }

    /// Whether `id` hangs off the document root. Detached subtrees created
    /// by [`Document::remove_from_parent`] report `false`.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.root == Some(self.top_ancestor(id))
    }

    // ----- mutation -----

    /// Attach `child` under `parent`, returning `child` for chaining.
    ///
    /// The child must not already have a parent: appending an element that
    /// is still listed under another parent leaves the old parent with a
    /// stale child entry. Call [`Document::remove_from_parent`] first when
    /// re-parenting.
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> ElementId {
        debug_assert!(
            !self.is_ancestor_or_self(child, parent),
            "appending an ancestor to its descendant creates a cycle"
        );
        self.elements[child.index()].parent = Some(parent);
        self.elements[parent.index()].children.push(child);
        child
    }

    /// Construct an element and attach it under `parent` in one step.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        value: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> Result<ElementId> {
        let child = self.new_element(name, value, attributes)?;
        Ok(self.append(parent, child))
    }

    /// Construct an element carrying namespace round-trip fields and attach
    /// it under `parent` in one step.
    pub fn add_child_ns(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        value: Option<&str>,
        namespace_uri: Option<&str>,
        qualified_name: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> Result<ElementId> {
        let child = self.new_element_ns(name, value, namespace_uri, qualified_name, attributes)?;
        Ok(self.append(parent, child))
    }

    /// Detach `id` from its parent. No-op for a root. The detached element
    /// becomes a new root; its own children stay attached to it, so this
    /// removes a whole subtree at once.
    pub fn remove_from_parent(&mut self, id: ElementId) {
        let Some(parent) = self.elements[id.index()].parent else {
            return;
        };
        let children = &mut self.elements[parent.index()].children;
        if let Some(pos) = children.iter().position(|&child| child == id) {
            children.remove(pos);
        }
        self.elements[id.index()].parent = None;
    }

    /// Whether `candidate` is `of` itself or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.element(id).parent;
        }
        false
    }
}
