//! vellum-paste: clipboard paste normalization.
//!
//! Clipboard HTML arrives padded, over-styled, and full of word-processor
//! artifacts. This crate runs it through a two-stage pipeline - string-level
//! pre-processing, then tree-level post-processing over a parsed fragment -
//! and hands back markup safe to insert at the caret. Hosts hook into either
//! stage through observer chains and inject word-filter/URL collaborators at
//! the seams.

pub mod collab;
pub mod context;
pub mod hooks;
pub mod process;
pub mod retain;
pub mod settings;

/// Marks wrapper elements around the pasted fragment; unwrapped first.
pub const FRAGMENT_ATTR: &str = "data-vellum-fragment";

/// Shadow copy of the `style` attribute kept by the host serializer.
/// Dropped or rewritten whenever the real style changes.
pub const STYLE_SHADOW_ATTR: &str = "data-vellum-style";

/// Flags a local/data-URI image as pending upload instead of removal.
pub const UPLOAD_MARKER_ATTR: &str = "data-vellum-upload-marker";

pub use collab::{Passthrough, UrlConverter, WordFilter};
pub use context::{PasteContext, PasteNodeContext};
pub use hooks::Observers;
pub use process::{Paster, is_word_content, post_process, pre_process};
pub use retain::StyleRetention;
pub use settings::PasteSettings;
