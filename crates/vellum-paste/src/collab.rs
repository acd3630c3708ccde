//! Injected collaborators the pipeline delegates to.
//!
//! Word-processor denormalization and URL rewriting are host concerns; the
//! pipeline only defines the seams and calls through them at the documented
//! stages. The no-op [`Passthrough`] is the default for both.

use vellum_dom::NodeRef;

/// Filters word-processor clipboard payloads.
pub trait WordFilter {
    /// Pre-parse pass over the raw markup string.
    fn filter_markup(&self, markup: String) -> String;

    /// Post-parse pass over the fragment tree.
    fn filter_tree(&self, root: &NodeRef);
}

/// Rewrites pasted resource URLs (e.g. to route through an editor's
/// document base). Implementations should be idempotent: post-processing
/// feeds already-converted URLs back through on repeated runs.
pub trait UrlConverter {
    fn convert(&self, url: &str) -> String;
}

/// Identity collaborator: no filtering, URLs unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl WordFilter for Passthrough {
    fn filter_markup(&self, markup: String) -> String {
        markup
    }

    fn filter_tree(&self, _root: &NodeRef) {}
}

impl UrlConverter for Passthrough {
    fn convert(&self, url: &str) -> String {
        url.to_string()
    }
}
