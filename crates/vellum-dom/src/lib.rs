//! vellum-dom: DOM-like tree model and traversal primitives.
//!
//! This crate provides:
//! - `NodeRef` - shared-ownership node handles with read and mutation APIs
//! - Node-type predicates (element/text/br/bookmark/bogus/editable state)
//! - `TreeWalker` - bounded forward/backward tree traversal
//! - Inline style parse/serialize and compiled tag selectors
//! - A lenient HTML fragment reader/writer for the paste pipeline
//! - Zero-width caret-marker utilities

pub mod fragment;
pub mod node;
pub mod predicate;
pub mod schema;
pub mod selector;
pub mod style;
pub mod walker;
pub mod zwsp;

pub use node::{NodeKind, NodeRef};
pub use selector::{Selector, SelectorError};
pub use smol_str::SmolStr;
pub use walker::TreeWalker;
