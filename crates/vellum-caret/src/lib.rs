//! vellum-caret: caret position navigation over the vellum DOM tree.
//!
//! This crate provides:
//! - `CaretPosition` - immutable (container, offset) caret locations
//! - Caret candidacy classification
//! - `CaretWalker` - raw next/prev position stepping inside a root
//! - Block-boundary tests for visual adjacency
//! - `finder` - navigation with duplicate-stop elision and element edges
//!
//! The caret subsystem never creates or destroys DOM nodes; exhaustion of a
//! traversal is a normal `None`, never an error.

pub mod block;
pub mod candidate;
pub mod finder;
pub mod position;
pub mod walker;

pub use block::{closest_block, is_in_same_block};
pub use candidate::is_caret_candidate;
pub use finder::{first_position_in, from_position, last_position_in, navigate};
pub use position::CaretPosition;
pub use walker::CaretWalker;
