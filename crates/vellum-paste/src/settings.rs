//! Paste normalization settings.
//!
//! Plain data, serde-loadable from host configuration. Every field has a
//! safe default; absent or unparsable pieces of configuration degrade to
//! those defaults instead of failing the paste.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PasteSettings {
    /// Strict HTML validation. When disabled, legacy `<b>` tags are
    /// normalized to `<strong>` during pre-processing.
    pub verify_html: bool,

    /// Strip every `class` attribute from pasted elements.
    pub strip_class_attributes: bool,

    /// Strip all inline styles. Ignored when a retain list is configured.
    pub remove_styles: bool,

    /// Comma- or space-delimited CSS property names to keep; shorthand
    /// group names (`border`, `font`, `padding`, `margin`) expand to their
    /// longhands.
    pub retain_style_properties: Option<String>,

    /// Property names to drop, subtracted from the retain set after
    /// expansion.
    pub remove_style_properties: Option<String>,

    /// Keep pasted data-URI/local images and tag them for upload instead of
    /// removing them.
    pub upload_data_images: bool,

    /// Selector for elements to remove (children kept).
    pub remove_tags: Option<String>,

    /// Selector for the only elements to keep; everything else is unwrapped.
    pub keep_tags: Option<String>,

    /// Unwrap every span instead of just the empty/attribute-less ones.
    pub remove_spans: bool,

    /// Drop paragraphs that are empty or whitespace/nbsp-only.
    pub remove_empty_paragraphs: bool,

    /// Strip legacy `font`/`u` tags nested inside anchors. Only wanted on
    /// legacy rendering engines, so opt-in.
    pub clean_anchor_font_tags: bool,
}

impl Default for PasteSettings {
    fn default() -> Self {
        PasteSettings {
            verify_html: true,
            strip_class_attributes: false,
            remove_styles: false,
            retain_style_properties: None,
            remove_style_properties: None,
            upload_data_images: false,
            remove_tags: None,
            keep_tags: None,
            remove_spans: false,
            remove_empty_paragraphs: true,
            clean_anchor_font_tags: false,
        }
    }
}
