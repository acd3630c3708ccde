//! Per-paste transient state flowing through the pipeline.

use vellum_dom::NodeRef;

/// The string stage: raw markup plus origin flags, created per paste event
/// and discarded after insertion.
#[derive(Clone, Debug)]
pub struct PasteContext {
    /// Raw clipboard markup, rewritten in place by pre-processing.
    pub content: String,
    /// Payload originates from a word processor and needs denormalization.
    pub word_content: bool,
    /// Plain-text paste: skip markup transformation.
    pub plain_text: bool,
}

impl PasteContext {
    pub fn new(content: impl Into<String>) -> Self {
        PasteContext {
            content: content.into(),
            word_content: false,
            plain_text: false,
        }
    }
}

/// The tree stage: the parsed fragment the post-process filters mutate in
/// place.
#[derive(Clone, Debug)]
pub struct PasteNodeContext {
    pub root: NodeRef,
    pub word_content: bool,
    pub plain_text: bool,
}

impl PasteNodeContext {
    pub fn new(root: NodeRef) -> Self {
        PasteNodeContext {
            root,
            word_content: false,
            plain_text: false,
        }
    }
}
