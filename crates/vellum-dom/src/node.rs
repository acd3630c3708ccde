//! Shared-ownership DOM-like node model.
//!
//! The tree owns its nodes top-down through reference-counted handles; parent
//! links are weak back-references so subtrees drop cleanly when detached.
//! Traversal APIs only read. Mutation (append/detach/unwrap) is confined to
//! the content-normalization layer and always keeps both sides of the
//! parent/child relation consistent.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

/// The type tag of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
    Fragment,
}

struct NodeData {
    kind: NodeKind,
    /// Lowercase tag name. Empty for non-elements.
    name: SmolStr,
    /// Ordered attribute list. Names are lowercase.
    attrs: RefCell<Vec<(SmolStr, String)>>,
    /// Character data for text and comment nodes.
    data: RefCell<String>,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<NodeRef>>,
}

/// Cheap-clone handle to a node. Identity is pointer identity, never
/// structural: two independently built `<p>` elements are not equal.
#[derive(Clone)]
pub struct NodeRef(Rc<NodeData>);

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Element => write!(f, "<{}>", self.0.name),
            NodeKind::Text => write!(f, "#text({:?})", self.0.data.borrow()),
            NodeKind::Comment => write!(f, "#comment"),
            NodeKind::Document => write!(f, "#document"),
            NodeKind::Fragment => write!(f, "#fragment"),
        }
    }
}

impl NodeRef {
    fn with_kind(kind: NodeKind, name: SmolStr, data: String) -> Self {
        NodeRef(Rc::new(NodeData {
            kind,
            name,
            attrs: RefCell::new(Vec::new()),
            data: RefCell::new(data),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Create a detached element. The tag name is lowercased.
    pub fn element(tag: &str) -> Self {
        Self::with_kind(NodeKind::Element, lowercase_name(tag), String::new())
    }

    /// Create a detached text node.
    pub fn text(data: &str) -> Self {
        Self::with_kind(NodeKind::Text, SmolStr::default(), data.to_string())
    }

    /// Create a detached comment node.
    pub fn comment(data: &str) -> Self {
        Self::with_kind(NodeKind::Comment, SmolStr::default(), data.to_string())
    }

    /// Create a document root.
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, SmolStr::default(), String::new())
    }

    /// Create a fragment root (parentless container for parsed markup).
    pub fn fragment() -> Self {
        Self::with_kind(NodeKind::Fragment, SmolStr::default(), String::new())
    }

    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    /// Same underlying node? Pointer identity, like `==`.
    pub fn same_node(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Lowercase tag name for elements, `None` otherwise.
    pub fn tag_name(&self) -> Option<SmolStr> {
        if self.0.kind == NodeKind::Element {
            Some(self.0.name.clone())
        } else {
            None
        }
    }

    /// True if this is an element with the given (case-insensitive) tag name.
    pub fn is_named(&self, tag: &str) -> bool {
        self.0.kind == NodeKind::Element && self.0.name.eq_ignore_ascii_case(tag)
    }

    // === Tree reads ===

    pub fn parent(&self) -> Option<NodeRef> {
        self.0.parent.borrow().upgrade().map(NodeRef)
    }

    /// Snapshot of the current child list.
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    pub fn child(&self, index: usize) -> Option<NodeRef> {
        self.0.children.borrow().get(index).cloned()
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        self.0.children.borrow().first().cloned()
    }

    pub fn last_child(&self) -> Option<NodeRef> {
        self.0.children.borrow().last().cloned()
    }

    /// Index of this node in its parent's child list.
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        children.iter().position(|c| c.same_node(self))
    }

    pub fn next_sibling(&self) -> Option<NodeRef> {
        let parent = self.parent()?;
        let index = self.index_in_parent()?;
        parent.child(index + 1)
    }

    pub fn prev_sibling(&self) -> Option<NodeRef> {
        let parent = self.parent()?;
        let index = self.index_in_parent()?;
        if index == 0 {
            None
        } else {
            parent.child(index - 1)
        }
    }

    /// Is `other` this node or one of its descendants?
    pub fn contains(&self, other: &NodeRef) -> bool {
        let mut cur = Some(other.clone());
        while let Some(node) = cur {
            if node.same_node(self) {
                return true;
            }
            cur = node.parent();
        }
        false
    }

    /// All descendants in document (pre-)order, excluding this node.
    ///
    /// Collected up front so callers may mutate the tree while iterating;
    /// detached nodes simply stop matching structural queries.
    pub fn descendants(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Descendant elements in document order, excluding this node.
    pub fn descendant_elements(&self) -> Vec<NodeRef> {
        self.descendants()
            .into_iter()
            .filter(|n| n.kind() == NodeKind::Element)
            .collect()
    }

    // === Character data ===

    /// Character data of a text or comment node.
    pub fn data(&self) -> Option<String> {
        match self.0.kind {
            NodeKind::Text | NodeKind::Comment => Some(self.0.data.borrow().clone()),
            _ => None,
        }
    }

    /// Character length of a text node's data. Zero for non-text nodes.
    ///
    /// Caret offsets into text are measured in `char`s, matching the offset
    /// semantics of caret positions.
    pub fn text_len(&self) -> usize {
        if self.0.kind == NodeKind::Text {
            self.0.data.borrow().chars().count()
        } else {
            0
        }
    }

    pub fn set_data(&self, data: &str) {
        if matches!(self.0.kind, NodeKind::Text | NodeKind::Comment) {
            *self.0.data.borrow_mut() = data.to_string();
        }
    }

    /// Concatenated text data of this node's subtree.
    pub fn text_content(&self) -> String {
        if self.0.kind == NodeKind::Text {
            return self.0.data.borrow().clone();
        }
        let mut out = String::new();
        for child in self.children() {
            out.push_str(&child.text_content());
        }
        out
    }

    // === Attributes ===

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .borrow()
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.0
            .attrs
            .borrow()
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Snapshot of the attribute list in document order.
    pub fn attrs(&self) -> Vec<(SmolStr, String)> {
        self.0.attrs.borrow().clone()
    }

    pub fn attr_count(&self) -> usize {
        self.0.attrs.borrow().len()
    }

    /// Set (or overwrite, keeping position) an attribute.
    pub fn set_attr(&self, name: &str, value: &str) {
        if self.0.kind != NodeKind::Element {
            return;
        }
        let name = lowercase_name(name);
        let mut attrs = self.0.attrs.borrow_mut();
        if let Some(slot) = attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name, value.to_string()));
        }
    }

    pub fn remove_attr(&self, name: &str) {
        self.0
            .attrs
            .borrow_mut()
            .retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Does the space-separated `class` attribute contain `token`?
    pub fn has_class(&self, token: &str) -> bool {
        match self.attr("class") {
            Some(classes) => classes.split_ascii_whitespace().any(|c| c == token),
            None => false,
        }
    }

    // === Mutation ===

    /// Append a child, detaching it from any previous parent first.
    pub fn append(&self, child: &NodeRef) {
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Insert `new` immediately before `reference`, which must be a child of
    /// this node; appends at the end otherwise.
    pub fn insert_before(&self, new: &NodeRef, reference: &NodeRef) {
        new.detach();
        let index = {
            let children = self.0.children.borrow();
            children.iter().position(|c| c.same_node(reference))
        };
        *new.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        let mut children = self.0.children.borrow_mut();
        match index {
            Some(i) => children.insert(i, new.clone()),
            None => children.push(new.clone()),
        }
    }

    /// Remove this node from its parent. No-op for detached nodes.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .children
                .borrow_mut()
                .retain(|c| !c.same_node(self));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    /// Replace this node with its children, preserving their order.
    ///
    /// No-op for detached nodes; the children stay attached to this node.
    pub fn unwrap_children(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        let Some(index) = self.index_in_parent() else {
            return;
        };
        let children = self.children();
        self.detach();
        {
            let mut slot = parent.0.children.borrow_mut();
            for (i, child) in children.iter().enumerate() {
                slot.insert(index + i, child.clone());
            }
        }
        for child in &children {
            *child.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
        }
    }
}

fn collect_descendants(node: &NodeRef, out: &mut Vec<NodeRef>) {
    for child in node.children() {
        out.push(child.clone());
        collect_descendants(&child, out);
    }
}

fn lowercase_name(name: &str) -> SmolStr {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        SmolStr::new(name.to_ascii_lowercase())
    } else {
        SmolStr::new(name)
    }
}
