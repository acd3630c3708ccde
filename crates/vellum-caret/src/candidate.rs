//! Caret candidacy: which nodes may visually host a caret.

use vellum_dom::NodeRef;
use vellum_dom::predicate::{
    is_bogus, is_bookmark, is_editable_boundary, is_element, is_text, is_void_element,
};

/// May a caret rest at this node?
///
/// Text nodes, void elements, and contenteditable boundaries qualify.
/// Internal bookmark and bogus markers never do, whatever their shape.
pub fn is_caret_candidate(node: &NodeRef) -> bool {
    if is_bookmark(node) || is_bogus(node) {
        return false;
    }
    if is_text(node) {
        return true;
    }
    if is_element(node) {
        return is_void_element(node) || is_editable_boundary(node);
    }
    false
}
