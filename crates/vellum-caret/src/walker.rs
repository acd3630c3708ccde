//! Stepping caret positions through the tree.
//!
//! `CaretWalker` advances a `CaretPosition` to the raw next/previous valid
//! position inside a root boundary. "Raw" because adjacent results can
//! coincide visually (end of a text node vs. before the next element); the
//! finder layer decides which of those stops to keep.

use vellum_dom::{NodeRef, TreeWalker};
use vellum_dom::predicate::is_text;

use crate::candidate::is_caret_candidate;
use crate::position::CaretPosition;

pub struct CaretWalker {
    root: NodeRef,
}

impl CaretWalker {
    /// A walker bounded by the given editing host.
    pub fn new(root: NodeRef) -> Self {
        CaretWalker { root }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// The next valid caret position, or `None` at the root boundary.
    pub fn next(&self, pos: &CaretPosition) -> Option<CaretPosition> {
        let container = pos.container().clone();

        if pos.is_text_position() {
            if pos.offset() < container.text_len() {
                return Some(CaretPosition::new(container, pos.offset() + 1));
            }
            // End of text: search past this node.
            return self.search_forward(container, false);
        }

        if pos.offset() < container.child_count() {
            let node = container.child(pos.offset())?;
            if is_caret_candidate(&node) {
                // Directly before a candidate: step into text, over elements.
                return if is_text(&node) {
                    Some(CaretPosition::new(node, 0))
                } else {
                    CaretPosition::after(&node)
                };
            }
            // Descend into the non-candidate child.
            return self.search_forward(node, true);
        }

        // After the last child: leave the container.
        self.search_forward(container, false)
    }

    /// The previous valid caret position, or `None` at the root boundary.
    pub fn prev(&self, pos: &CaretPosition) -> Option<CaretPosition> {
        let container = pos.container().clone();

        if pos.is_text_position() {
            if pos.offset() > 0 {
                return Some(CaretPosition::new(container, pos.offset() - 1));
            }
            return self.search_backward(container, false);
        }

        if pos.offset() > 0 {
            let node = container.child(pos.offset() - 1)?;
            if is_caret_candidate(&node) {
                return if is_text(&node) {
                    Some(CaretPosition::new(node.clone(), node.text_len()))
                } else {
                    CaretPosition::before(&node)
                };
            }
            return self.search_backward(node, true);
        }

        // Before the first child: leave the container.
        self.search_backward(container, false)
    }

    /// Walk forward from `from` to the first caret candidate. When `descend`
    /// is set the walk enters `from`'s subtree; otherwise the first step is
    /// shallow, skipping the subtree already behind the position.
    fn search_forward(&self, from: NodeRef, descend: bool) -> Option<CaretPosition> {
        let mut walker = TreeWalker::new(from, self.root.clone());
        let mut shallow = !descend;
        while let Some(node) = walker.next(shallow) {
            shallow = false;
            if is_caret_candidate(&node) {
                return if is_text(&node) {
                    Some(CaretPosition::new(node, 0))
                } else {
                    CaretPosition::before(&node)
                };
            }
        }
        None
    }

    fn search_backward(&self, from: NodeRef, descend: bool) -> Option<CaretPosition> {
        let mut walker = TreeWalker::new(from, self.root.clone());
        let mut shallow = !descend;
        while let Some(node) = walker.prev(shallow) {
            shallow = false;
            if is_caret_candidate(&node) {
                return if is_text(&node) {
                    Some(CaretPosition::new(node.clone(), node.text_len()))
                } else {
                    CaretPosition::after(&node)
                };
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_interior_round_trip() {
        let root = NodeRef::element("div");
        let t = NodeRef::text("abc");
        root.append(&t);
        let walker = CaretWalker::new(root);

        let p1 = CaretPosition::new(t.clone(), 1);
        let p2 = walker.next(&p1).unwrap();
        assert_eq!(p2, CaretPosition::new(t.clone(), 2));
        assert_eq!(walker.prev(&p2).unwrap(), p1);
    }

    #[test]
    fn test_exhaustion_at_root_boundary() {
        let root = NodeRef::element("div");
        let t = NodeRef::text("ab");
        root.append(&t);
        let walker = CaretWalker::new(root.clone());

        assert!(walker.next(&CaretPosition::new(t.clone(), 2)).is_none());
        assert!(walker.prev(&CaretPosition::new(t, 0)).is_none());
        assert!(walker.next(&CaretPosition::new(root.clone(), 1)).is_none());
        assert!(walker.prev(&CaretPosition::new(root, 0)).is_none());
    }

    #[test]
    fn test_crosses_into_adjacent_text() {
        // <div>"ab"<b>"cd"</b></div>
        let root = NodeRef::element("div");
        let ab = NodeRef::text("ab");
        let b = NodeRef::element("b");
        let cd = NodeRef::text("cd");
        root.append(&ab);
        root.append(&b);
        b.append(&cd);
        let walker = CaretWalker::new(root);

        let to = walker.next(&CaretPosition::new(ab.clone(), 2)).unwrap();
        assert_eq!(to, CaretPosition::new(cd.clone(), 0));

        let back = walker.prev(&CaretPosition::new(cd, 0)).unwrap();
        assert_eq!(back, CaretPosition::new(ab, 2));
    }

    #[test]
    fn test_steps_over_br() {
        // <div>"a"<br>"b"</div>
        let root = NodeRef::element("div");
        let a = NodeRef::text("a");
        let br = NodeRef::element("br");
        let b = NodeRef::text("b");
        root.append(&a);
        root.append(&br);
        root.append(&b);
        let walker = CaretWalker::new(root.clone());

        // End of "a" -> before <br>.
        let before_br = walker.next(&CaretPosition::new(a.clone(), 1)).unwrap();
        assert_eq!(before_br, CaretPosition::new(root.clone(), 1));
        // Before <br> -> after <br>.
        let after_br = walker.next(&before_br).unwrap();
        assert_eq!(after_br, CaretPosition::new(root.clone(), 2));
        // After <br> -> start of "b".
        let in_b = walker.next(&after_br).unwrap();
        assert_eq!(in_b, CaretPosition::new(b, 0));

        // And backward again.
        assert_eq!(walker.prev(&in_b).unwrap(), after_br);
        assert_eq!(walker.prev(&after_br).unwrap(), before_br);
        assert_eq!(walker.prev(&before_br).unwrap(), CaretPosition::new(a, 1));
    }

    #[test]
    fn test_descends_into_wrapped_text() {
        // <div><p><b>"x"</b></p></div>, starting before <p>.
        let root = NodeRef::element("div");
        let p = NodeRef::element("p");
        let b = NodeRef::element("b");
        let x = NodeRef::text("x");
        root.append(&p);
        p.append(&b);
        b.append(&x);
        let walker = CaretWalker::new(root.clone());

        let found = walker.next(&CaretPosition::new(root, 0)).unwrap();
        assert_eq!(found, CaretPosition::new(x, 0));
    }

    #[test]
    fn test_skips_bogus_nodes() {
        use vellum_dom::predicate::BOGUS_ATTR;
        // <div>"a"<br bogus>"b"</div>: the bogus br is not a stop.
        let root = NodeRef::element("div");
        let a = NodeRef::text("a");
        let br = NodeRef::element("br");
        br.set_attr(BOGUS_ATTR, "1");
        let b = NodeRef::text("b");
        root.append(&a);
        root.append(&br);
        root.append(&b);
        let walker = CaretWalker::new(root);

        let to = walker.next(&CaretPosition::new(a, 1)).unwrap();
        assert_eq!(to, CaretPosition::new(b, 0));
    }

    #[test]
    fn test_backward_into_element_end() {
        // <div><b>"xy"</b>"z"</div>: from (z,0) backward into "xy".
        let root = NodeRef::element("div");
        let b = NodeRef::element("b");
        let xy = NodeRef::text("xy");
        let z = NodeRef::text("z");
        root.append(&b);
        b.append(&xy);
        root.append(&z);
        let walker = CaretWalker::new(root);

        let to = walker.prev(&CaretPosition::new(z, 0)).unwrap();
        assert_eq!(to, CaretPosition::new(xy, 2));
    }

    #[test]
    fn test_non_editable_island_is_atomic() {
        // <div ce=true>"a"<span ce=false>"hidden"</span>"b"</div>
        let root = NodeRef::element("div");
        root.set_attr("contenteditable", "true");
        let a = NodeRef::text("a");
        let island = NodeRef::element("span");
        island.set_attr("contenteditable", "false");
        island.append(&NodeRef::text("hidden"));
        let b = NodeRef::text("b");
        root.append(&a);
        root.append(&island);
        root.append(&b);
        let walker = CaretWalker::new(root.clone());

        // Forward from end of "a": before the island, then over it.
        let before = walker.next(&CaretPosition::new(a, 1)).unwrap();
        assert_eq!(before, CaretPosition::new(root.clone(), 1));
        let after = walker.next(&before).unwrap();
        assert_eq!(after, CaretPosition::new(root, 2));
        let into_b = walker.next(&after).unwrap();
        assert_eq!(into_b, CaretPosition::new(b, 0));
    }
}
