//! Generic tree traversal bounded by a root node.
//!
//! A walker carries a single mutable `current` pointer and a fixed `root`
//! boundary. `next` walks forward in pre-order, `prev` is its mirror (descend
//! into last children first), and `prev2` steps to the true previous node in
//! document order by descending to the deepest last descendant of the
//! previous sibling. Traversal never crosses above `root`; exhaustion is
//! signaled by `None` and is idempotent.

use crate::node::NodeRef;

enum Direction {
    Forward,
    Backward,
}

pub struct TreeWalker {
    current: Option<NodeRef>,
    root: NodeRef,
}

impl TreeWalker {
    /// Start a traversal at `start`, bounded by `root`.
    pub fn new(start: NodeRef, root: NodeRef) -> Self {
        TreeWalker {
            current: Some(start),
            root,
        }
    }

    /// The node the walker currently points at, or `None` after exhaustion.
    pub fn current(&self) -> Option<NodeRef> {
        self.current.clone()
    }

    /// Step forward: first child unless `shallow`, else next sibling, else
    /// the nearest ancestor's next sibling (stopping at the root boundary).
    pub fn next(&mut self, shallow: bool) -> Option<NodeRef> {
        let found = self
            .current
            .as_ref()
            .and_then(|node| self.find_sibling(node, Direction::Forward, shallow));
        self.current = found.clone();
        found
    }

    /// Step backward, the mirror of [`next`](Self::next): last child unless
    /// `shallow`, else previous sibling, else an ancestor's previous sibling.
    pub fn prev(&mut self, shallow: bool) -> Option<NodeRef> {
        let found = self
            .current
            .as_ref()
            .and_then(|node| self.find_sibling(node, Direction::Backward, shallow));
        self.current = found.clone();
        found
    }

    /// Step to the previous node in document order: the deepest last
    /// descendant of the previous sibling (unless `shallow`), else the
    /// parent. Terminates if the previous sibling is the root itself.
    pub fn prev2(&mut self, shallow: bool) -> Option<NodeRef> {
        let found = self
            .current
            .as_ref()
            .and_then(|node| self.find_previous(node, shallow));
        self.current = found.clone();
        found
    }

    fn find_sibling(&self, node: &NodeRef, dir: Direction, shallow: bool) -> Option<NodeRef> {
        if !shallow {
            let child = match dir {
                Direction::Forward => node.first_child(),
                Direction::Backward => node.last_child(),
            };
            if let Some(child) = child {
                return Some(child);
            }
        }

        if node.same_node(&self.root) {
            return None;
        }
        if let Some(sibling) = sibling_of(node, &dir) {
            return Some(sibling);
        }

        let mut parent = node.parent();
        while let Some(p) = parent {
            if p.same_node(&self.root) {
                break;
            }
            if let Some(sibling) = sibling_of(&p, &dir) {
                return Some(sibling);
            }
            parent = p.parent();
        }
        None
    }

    fn find_previous(&self, node: &NodeRef, shallow: bool) -> Option<NodeRef> {
        if let Some(sibling) = node.prev_sibling() {
            // Never step onto (or inside) the root boundary itself.
            if sibling.same_node(&self.root) {
                return None;
            }
            if shallow {
                return Some(sibling);
            }
            let mut deepest = sibling;
            while let Some(last) = deepest.last_child() {
                deepest = last;
            }
            return Some(deepest);
        }

        match node.parent() {
            Some(parent) if !parent.same_node(&self.root) => Some(parent),
            _ => None,
        }
    }
}

fn sibling_of(node: &NodeRef, dir: &Direction) -> Option<NodeRef> {
    match dir {
        Direction::Forward => node.next_sibling(),
        Direction::Backward => node.prev_sibling(),
    }
}
