//! Block-boundary tests for caret positions.
//!
//! Two caret positions are only candidates for visual merging when they sit
//! inside the same block: crossing a block edge is always a real caret move.

use vellum_dom::NodeRef;
use vellum_dom::predicate::is_block_element;

use crate::position::CaretPosition;

/// The closest block-level element at or above `node`, bounded by `root`
/// (the root itself is considered, nothing above it is).
pub fn closest_block(node: &NodeRef, root: &NodeRef) -> Option<NodeRef> {
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        if is_block_element(&n) {
            return Some(n);
        }
        if n.same_node(root) {
            return None;
        }
        cur = n.parent();
    }
    None
}

/// Do both positions sit inside the same block? Positions outside any block
/// (both blockless) count as same.
pub fn is_in_same_block(a: &CaretPosition, b: &CaretPosition, root: &NodeRef) -> bool {
    match (
        closest_block(a.container(), root),
        closest_block(b.container(), root),
    ) {
        (Some(x), Some(y)) => x.same_node(&y),
        (None, None) => true,
        _ => false,
    }
}
