//! Abstract caret locations.
//!
//! A `CaretPosition` is an immutable `(container, offset)` pair, independent
//! of any native selection object. For text containers the offset indexes
//! into the character data (`0..=len`); for element containers it denotes the
//! gap between children (`0` = before the first child, `child_count` = after
//! the last). Consumers derive new positions; nothing here mutates the tree.

use vellum_dom::NodeRef;
use vellum_dom::predicate::is_text;

use crate::candidate::is_caret_candidate;

#[derive(Clone, Debug)]
pub struct CaretPosition {
    container: NodeRef,
    offset: usize,
}

impl PartialEq for CaretPosition {
    fn eq(&self, other: &Self) -> bool {
        self.container.same_node(&other.container) && self.offset == other.offset
    }
}

impl Eq for CaretPosition {}

impl CaretPosition {
    pub fn new(container: NodeRef, offset: usize) -> Self {
        CaretPosition { container, offset }
    }

    /// The position just before `node` inside its parent, if it has one.
    pub fn before(node: &NodeRef) -> Option<CaretPosition> {
        let parent = node.parent()?;
        let index = node.index_in_parent()?;
        Some(CaretPosition::new(parent, index))
    }

    /// The position just after `node` inside its parent, if it has one.
    pub fn after(node: &NodeRef) -> Option<CaretPosition> {
        let parent = node.parent()?;
        let index = node.index_in_parent()?;
        Some(CaretPosition::new(parent, index + 1))
    }

    pub fn container(&self) -> &NodeRef {
        &self.container
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_text_position(&self) -> bool {
        is_text(&self.container)
    }

    /// The node this position looks at.
    ///
    /// For text containers, the container itself. For element containers, the
    /// child at `offset` - or, when `before` is set, the child at
    /// `offset - 1` (the backward-looking direction). `None` when the
    /// indicated slot is out of range (e.g. `before` at offset 0).
    pub fn node(&self, before: bool) -> Option<NodeRef> {
        if self.is_text_position() {
            return Some(self.container.clone());
        }
        let index = if before {
            self.offset.checked_sub(1)?
        } else {
            self.offset
        };
        self.container.child(index)
    }

    /// Is this position at the start of its container? Offset 0 for text;
    /// for elements, whether the forward-looking node is a caret candidate.
    pub fn at_start(&self) -> bool {
        if self.is_text_position() {
            return self.offset == 0;
        }
        self.node(false).is_some_and(|n| is_caret_candidate(&n))
    }

    /// Is this position at the end of its container? Offset == length for
    /// text; for elements, whether the backward-looking node is a caret
    /// candidate.
    pub fn at_end(&self) -> bool {
        if self.is_text_position() {
            return self.offset == self.container.text_len();
        }
        self.node(true).is_some_and(|n| is_caret_candidate(&n))
    }
}
