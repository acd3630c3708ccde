//! Node-type predicates.
//!
//! Pure classification functions over nodes. All of them degrade to `false`
//! for nodes of the wrong kind rather than failing; callers never need to
//! pre-validate.

use crate::node::{NodeKind, NodeRef};
use crate::schema;

/// Attribute marking internal nodes excluded from caret and content
/// semantics (e.g. padding elements the serializer drops).
pub const BOGUS_ATTR: &str = "data-vellum-bogus";

/// Attribute carrying the internal node type, e.g. `bookmark` for
/// selection bookmark markers.
pub const INTERNAL_TYPE_ATTR: &str = "data-vellum-type";

pub fn is_element(node: &NodeRef) -> bool {
    node.kind() == NodeKind::Element
}

pub fn is_text(node: &NodeRef) -> bool {
    node.kind() == NodeKind::Text
}

pub fn is_comment(node: &NodeRef) -> bool {
    node.kind() == NodeKind::Comment
}

pub fn is_br(node: &NodeRef) -> bool {
    node.is_named("br")
}

/// Void element (`<br>`, `<img>`, ...): may host a caret on either side but
/// never contains one.
pub fn is_void_element(node: &NodeRef) -> bool {
    match node.tag_name() {
        Some(tag) => schema::is_void_tag(&tag),
        None => false,
    }
}

/// Block-level element.
pub fn is_block_element(node: &NodeRef) -> bool {
    match node.tag_name() {
        Some(tag) => schema::is_block_tag(&tag),
        None => false,
    }
}

/// Selection bookmark marker node.
pub fn is_bookmark(node: &NodeRef) -> bool {
    is_element(node) && node.attr(INTERNAL_TYPE_ATTR).as_deref() == Some("bookmark")
}

/// Internal marker excluded from caret/content semantics.
pub fn is_bogus(node: &NodeRef) -> bool {
    is_element(node) && node.has_attr(BOGUS_ATTR)
}

/// The explicit `contenteditable` override on this element, if any.
pub fn content_editable_override(node: &NodeRef) -> Option<bool> {
    match node.attr("contenteditable")?.trim() {
        "true" | "" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Effective editable state: the explicit override if present, otherwise the
/// nearest ancestor's. A tree with no overrides anywhere is editable, which
/// matches the editing-host subtrees this crate operates on.
pub fn effective_editable_state(node: &NodeRef) -> bool {
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        if is_element(&n) {
            if let Some(state) = content_editable_override(&n) {
                return state;
            }
        }
        cur = n.parent();
    }
    true
}

/// Explicitly editable, or inheriting an editable state.
pub fn is_content_editable_true(node: &NodeRef) -> bool {
    effective_editable_state(node)
}

/// Explicitly non-editable, or inheriting a non-editable state.
pub fn is_content_editable_false(node: &NodeRef) -> bool {
    !effective_editable_state(node)
}

/// A contenteditable boundary: an element whose explicit editable state
/// differs from its parent's effective state. Such elements behave like
/// atoms for caret purposes.
pub fn is_editable_boundary(node: &NodeRef) -> bool {
    if !is_element(node) {
        return false;
    }
    let Some(own) = content_editable_override(node) else {
        return false;
    };
    let parent_state = match node.parent() {
        Some(parent) => effective_editable_state(&parent),
        None => true,
    };
    own != parent_state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_kinds() {
        assert!(is_element(&NodeRef::element("p")));
        assert!(is_text(&NodeRef::text("x")));
        assert!(is_comment(&NodeRef::comment("c")));
        assert!(is_br(&NodeRef::element("br")));
        assert!(!is_br(&NodeRef::element("b")));
        assert!(is_void_element(&NodeRef::element("img")));
        assert!(!is_void_element(&NodeRef::text("x")));
    }

    #[test]
    fn test_internal_markers() {
        let bm = NodeRef::element("span");
        bm.set_attr(INTERNAL_TYPE_ATTR, "bookmark");
        assert!(is_bookmark(&bm));

        let bogus = NodeRef::element("br");
        bogus.set_attr(BOGUS_ATTR, "all");
        assert!(is_bogus(&bogus));
        assert!(!is_bogus(&NodeRef::element("br")));
    }

    #[test]
    fn test_editable_state_inherits() {
        let host = NodeRef::element("div");
        host.set_attr("contenteditable", "true");
        let p = NodeRef::element("p");
        let t = NodeRef::text("x");
        host.append(&p);
        p.append(&t);

        assert!(is_content_editable_true(&t));
        assert!(!is_content_editable_false(&p));
    }

    #[test]
    fn test_editable_boundary() {
        let host = NodeRef::element("div");
        host.set_attr("contenteditable", "true");
        let island = NodeRef::element("span");
        island.set_attr("contenteditable", "false");
        host.append(&island);

        assert!(is_editable_boundary(&island));
        // The host's override matches the parentless default state.
        assert!(!is_editable_boundary(&host));

        let plain = NodeRef::element("span");
        host.append(&plain);
        assert!(!is_editable_boundary(&plain));
    }

    #[test]
    fn test_nested_boundary_flips_back() {
        let host = NodeRef::element("div");
        host.set_attr("contenteditable", "true");
        let frozen = NodeRef::element("div");
        frozen.set_attr("contenteditable", "false");
        let thawed = NodeRef::element("span");
        thawed.set_attr("contenteditable", "true");
        host.append(&frozen);
        frozen.append(&thawed);

        assert!(is_editable_boundary(&frozen));
        assert!(is_editable_boundary(&thawed));
        assert!(is_content_editable_false(&frozen));
        assert!(is_content_editable_true(&thawed));
    }
}
