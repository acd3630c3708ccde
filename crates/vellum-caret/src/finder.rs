//! Caret navigation with duplicate-stop elision.
//!
//! Raw walker steps can yield two distinct positions for one visual caret
//! location: the end of a text node and the start of the adjacent node
//! coincide on screen. `navigate` steps once and then keeps stepping while
//! the landing position would duplicate the departure point, with two
//! exemptions that keep real stops: the before/after pair around a single
//! element, and positions at a line break.

use vellum_dom::NodeRef;
use vellum_dom::predicate::is_br;

use crate::block::is_in_same_block;
use crate::position::CaretPosition;
use crate::walker::CaretWalker;

/// One raw walker step from `pos` inside `root`.
pub fn from_position(forward: bool, root: &NodeRef, pos: &CaretPosition) -> Option<CaretPosition> {
    let walker = CaretWalker::new(root.clone());
    if forward {
        walker.next(pos)
    } else {
        walker.prev(pos)
    }
}

/// A non-text position looking directly at a line break.
fn is_at_br(pos: &CaretPosition) -> bool {
    !pos.is_text_position() && pos.node(false).is_some_and(|n| is_br(&n))
}

/// `from` is before and `to` after the very same element.
fn is_before_after_same_element(from: &CaretPosition, to: &CaretPosition) -> bool {
    if from.is_text_position() || to.is_text_position() {
        return false;
    }
    match (from.node(false), to.node(true)) {
        (Some(a), Some(b)) => a.same_node(&b),
        _ => false,
    }
}

/// Does stepping from `from` to `to` duplicate a visual caret stop?
///
/// Forward: skip exactly when `from` sits at the end of its container and
/// `to` at the start of its own, unless the two flank the same element or
/// `from` is itself a line-break position. Backward is the mirror image,
/// with the line-break exemption applying to `to`.
pub fn should_skip_position(forward: bool, from: &CaretPosition, to: &CaretPosition) -> bool {
    if forward {
        !is_before_after_same_element(from, to) && !is_at_br(from) && from.at_end() && to.at_start()
    } else {
        !is_before_after_same_element(to, from) && !is_at_br(to) && from.at_start() && to.at_end()
    }
}

/// Step to the next meaningful caret stop, eliding duplicate stops within
/// the same block. Returns `None` when the root is exhausted.
///
/// The skip loop is bounded: every iteration advances the walker, which
/// strictly progresses toward the root boundary.
pub fn navigate(forward: bool, root: &NodeRef, from: &CaretPosition) -> Option<CaretPosition> {
    let mut from = from.clone();
    let mut to = from_position(forward, root, &from)?;
    loop {
        if is_in_same_block(&from, &to, root) && should_skip_position(forward, &from, &to) {
            tracing::trace!(
                target: "vellum::caret",
                forward,
                from = ?from,
                skipped = ?to,
                "eliding duplicate caret stop"
            );
            let next = from_position(forward, root, &to)?;
            from = to;
            to = next;
        } else {
            return Some(to);
        }
    }
}

/// The first caret position inside `element`, or `None` when it has none.
pub fn first_position_in(element: &NodeRef) -> Option<CaretPosition> {
    let child = element.first_child()?;
    edge_position(true, element, child)
}

/// The last caret position inside `element`, or `None` when it has none.
pub fn last_position_in(element: &NodeRef) -> Option<CaretPosition> {
    let child = element.last_child()?;
    edge_position(false, element, child)
}

fn edge_position(first: bool, element: &NodeRef, child: NodeRef) -> Option<CaretPosition> {
    use crate::candidate::is_caret_candidate;
    use vellum_dom::TreeWalker;
    use vellum_dom::predicate::is_text;

    let position_for = |node: &NodeRef| -> Option<CaretPosition> {
        if is_text(node) {
            let offset = if first { 0 } else { node.text_len() };
            return Some(CaretPosition::new(node.clone(), offset));
        }
        if first {
            CaretPosition::before(node)
        } else {
            CaretPosition::after(node)
        }
    };

    if is_text(&child) || is_caret_candidate(&child) {
        return position_for(&child);
    }

    let mut walker = TreeWalker::new(child, element.clone());
    loop {
        let node = if first {
            walker.next(false)?
        } else {
            walker.prev(false)?
        };
        if is_caret_candidate(&node) {
            return position_for(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect every stop from `first_position_in` onward.
    fn forward_stops(root: &NodeRef) -> Vec<CaretPosition> {
        let mut stops = Vec::new();
        let Some(mut pos) = first_position_in(root) else {
            return stops;
        };
        stops.push(pos.clone());
        let limit = root.descendants().len() * 4 + 8;
        for _ in 0..limit {
            match navigate(true, root, &pos) {
                Some(next) => {
                    assert_ne!(next, pos, "navigate must make progress");
                    stops.push(next.clone());
                    pos = next;
                }
                None => return stops,
            }
        }
        panic!("navigate failed to terminate");
    }

    #[test]
    fn test_first_last_position_simple() {
        let p = NodeRef::element("p");
        let t = NodeRef::text("ab");
        p.append(&t);
        assert_eq!(first_position_in(&p).unwrap(), CaretPosition::new(t.clone(), 0));
        assert_eq!(last_position_in(&p).unwrap(), CaretPosition::new(t, 2));
        assert!(first_position_in(&NodeRef::element("p")).is_none());
    }

    #[test]
    fn test_first_last_position_br() {
        let p = NodeRef::element("p");
        let br = NodeRef::element("br");
        p.append(&br);
        assert_eq!(first_position_in(&p).unwrap(), CaretPosition::new(p.clone(), 0));
        assert_eq!(last_position_in(&p).unwrap(), CaretPosition::new(p, 1));
    }

    #[test]
    fn test_first_position_descends_wrappers() {
        // <p><b><i>"x"</i></b></p>
        let p = NodeRef::element("p");
        let b = NodeRef::element("b");
        let i = NodeRef::element("i");
        let x = NodeRef::text("x");
        p.append(&b);
        b.append(&i);
        i.append(&x);
        assert_eq!(first_position_in(&p).unwrap(), CaretPosition::new(x.clone(), 0));
        assert_eq!(last_position_in(&p).unwrap(), CaretPosition::new(x, 1));
    }

    #[test]
    fn test_skip_inline_boundary_forward() {
        // <p>"ab"<b>"cd"</b></p>: end of "ab" and start of "cd" are one
        // visual stop; forward navigation jumps into "cd".
        let p = NodeRef::element("p");
        let ab = NodeRef::text("ab");
        let b = NodeRef::element("b");
        let cd = NodeRef::text("cd");
        p.append(&ab);
        p.append(&b);
        b.append(&cd);

        let to = navigate(true, &p, &CaretPosition::new(ab, 2)).unwrap();
        assert_eq!(to, CaretPosition::new(cd, 1));
    }

    #[test]
    fn test_skip_inline_boundary_backward() {
        let p = NodeRef::element("p");
        let ab = NodeRef::text("ab");
        let b = NodeRef::element("b");
        let cd = NodeRef::text("cd");
        p.append(&ab);
        p.append(&b);
        b.append(&cd);

        let to = navigate(false, &p, &CaretPosition::new(cd, 0)).unwrap();
        assert_eq!(to, CaretPosition::new(ab, 1));
    }

    #[test]
    fn test_no_skip_across_block_boundary() {
        // <div><p>"a"</p><p>"b"</p></div>: crossing blocks keeps the stop.
        let root = NodeRef::element("div");
        let p1 = NodeRef::element("p");
        let a = NodeRef::text("a");
        let p2 = NodeRef::element("p");
        let b = NodeRef::text("b");
        root.append(&p1);
        p1.append(&a);
        root.append(&p2);
        p2.append(&b);

        let to = navigate(true, &root, &CaretPosition::new(a, 1)).unwrap();
        assert_eq!(to, CaretPosition::new(b, 0));
    }

    #[test]
    fn test_line_break_stops() {
        // <p>"a"<br>"b"</p>: one visual stop per line edge.
        let p = NodeRef::element("p");
        let a = NodeRef::text("a");
        let br = NodeRef::element("br");
        let b = NodeRef::text("b");
        p.append(&a);
        p.append(&br);
        p.append(&b);

        // Forward from end of "a": before-br duplicates it, so the caret
        // crosses the line break and stops after it (start of line two).
        let stop = navigate(true, &p, &CaretPosition::new(a.clone(), 1)).unwrap();
        assert_eq!(stop, CaretPosition::new(p.clone(), 2));

        // Backward from (b,0): after-br duplicates it; the line-break
        // exemption then keeps before-br (end of line one) as a real stop.
        let back = navigate(false, &p, &CaretPosition::new(b, 0)).unwrap();
        assert_eq!(back, CaretPosition::new(p.clone(), 1));

        // Empty-line case: before-br steps to after-br, flanking the same
        // element, which is never elided.
        let from = CaretPosition::new(p.clone(), 1);
        let to = navigate(true, &p, &from);
        assert_eq!(to.unwrap(), CaretPosition::new(p, 2));
    }

    #[test]
    fn test_before_after_same_element_not_skipped() {
        // <p>"a"<img>"b"</p>: before(img) -> after(img) is a real move.
        let p = NodeRef::element("p");
        let a = NodeRef::text("a");
        let img = NodeRef::element("img");
        let b = NodeRef::text("b");
        p.append(&a);
        p.append(&img);
        p.append(&b);

        let before_img = CaretPosition::new(p.clone(), 1);
        let to = navigate(true, &p, &before_img).unwrap();
        assert_eq!(to, CaretPosition::new(p.clone(), 2));
    }

    #[test]
    fn test_navigate_covers_root_and_terminates() {
        // <div><p>"ab"<b>"c"</b><br></p><p><img>"d"</p></div>
        let root = NodeRef::element("div");
        let p1 = NodeRef::element("p");
        let ab = NodeRef::text("ab");
        let bold = NodeRef::element("b");
        let c = NodeRef::text("c");
        let br = NodeRef::element("br");
        let p2 = NodeRef::element("p");
        let img = NodeRef::element("img");
        let d = NodeRef::text("d");
        root.append(&p1);
        p1.append(&ab);
        p1.append(&bold);
        bold.append(&c);
        p1.append(&br);
        root.append(&p2);
        p2.append(&img);
        p2.append(&d);

        let stops = forward_stops(&root);
        assert_eq!(stops.first().unwrap(), &CaretPosition::new(ab, 0));
        assert_eq!(stops.last().unwrap(), &last_position_in(&root).unwrap());
        // No duplicate stops.
        for (i, a) in stops.iter().enumerate() {
            for b in &stops[i + 1..] {
                assert_ne!(a, b, "revisited a caret position");
            }
        }
    }

    #[test]
    fn test_empty_root() {
        let root = NodeRef::element("div");
        assert!(first_position_in(&root).is_none());
        assert!(last_position_in(&root).is_none());
    }
}
