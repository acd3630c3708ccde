//! The paste normalization pipeline.
//!
//! Two stages. Pre-processing rewrites the raw markup string before it is
//! parsed; post-processing mutates the parsed fragment tree. Both are
//! dispatched through observer chains so hosts can inject their own filters
//! before or after the built-in ones, and a handler returning `false`
//! cancels the paste.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use vellum_dom::{NodeRef, Selector, fragment, style};
use vellum_dom::schema::is_table_sizing_tag;

use crate::collab::{Passthrough, UrlConverter, WordFilter};
use crate::context::{PasteContext, PasteNodeContext};
use crate::hooks::Observers;
use crate::retain::{StyleRetention, convert_align};
use crate::settings::PasteSettings;
use crate::{FRAGMENT_ATTR, STYLE_SHADOW_ATTR, UPLOAD_MARKER_ATTR};

static LEADING_NBSP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:&nbsp;)+").unwrap());
static TRAILING_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:&nbsp;|<br[^>]*>)+\s*$").unwrap());
static B_START_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<b\b([^>]*)>").unwrap());
static B_END_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</b\s*>").unwrap());
static EMPTY_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s|&nbsp;|\x{A0})*$").unwrap());
static WORD_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class="?mso|style="[^"]*\bmso-|w:worddocument|urn:schemas-microsoft-com:office"#)
        .unwrap()
});

/// Does this markup look like it came from a word processor?
pub fn is_word_content(markup: &str) -> bool {
    WORD_MARKERS.is_match(markup)
}

/// The string stage: trim clipboard padding, delegate word-processor
/// denormalization, and normalize legacy tags.
pub fn pre_process(settings: &PasteSettings, word: &dyn WordFilter, ctx: &mut PasteContext) {
    // Browsers pad clipboard fragments with non-breaking spaces and
    // trailing line breaks that were never part of the selection. Plain-text
    // pastes carry the same padding, so this runs before the early return.
    let trimmed = LEADING_NBSP.replace(&ctx.content, "");
    let trimmed = TRAILING_PADDING.replace(&trimmed, "");
    if trimmed != ctx.content {
        ctx.content = trimmed.into_owned();
    }

    if ctx.plain_text {
        return;
    }

    if ctx.word_content {
        ctx.content = word.filter_markup(std::mem::take(&mut ctx.content));
    }

    if !settings.verify_html {
        let replaced = B_START_TAG.replace_all(&ctx.content, "<strong$1>");
        let replaced = B_END_TAG.replace_all(&replaced, "</strong>");
        if replaced != ctx.content {
            ctx.content = replaced.into_owned();
        }
    }
}

/// The tree stage: the ordered cleanup passes over the parsed fragment.
///
/// Every pass is idempotent, so running the stage twice over the same tree
/// is a no-op the second time.
pub fn post_process(
    settings: &PasteSettings,
    word: &dyn WordFilter,
    urls: &dyn UrlConverter,
    ctx: &mut PasteNodeContext,
) {
    let root = ctx.root.clone();

    // Wrapper elements marking the pasted fragment carry no content.
    for el in root.descendant_elements() {
        if el.has_attr(FRAGMENT_ATTR) {
            el.unwrap_children();
        }
    }

    if ctx.plain_text {
        return;
    }

    for el in root.descendant_elements() {
        if el.is_named("span") && el.has_class("Apple-style-span") {
            el.unwrap_children();
        }
    }

    if settings.strip_class_attributes {
        for el in root.descendant_elements() {
            el.remove_attr("class");
        }
    }

    convert_table_sizing(&root);

    if settings.remove_styles && settings.retain_style_properties.is_none() {
        // Strip mode removes styles only; the align attribute survives so
        // the alignment is not silently lost.
        for el in root.descendant_elements() {
            el.remove_attr("style");
            el.remove_attr(STYLE_SHADOW_ATTR);
        }
    } else {
        // Align conversion precedes retention so the styles it produces are
        // filtered like any pasted ones.
        convert_align(&root);
        if let Some(engine) = StyleRetention::from_settings(settings) {
            engine.apply(&root);
        }
    }

    if ctx.word_content {
        word.filter_tree(&root);
    }

    process_images(settings, urls, &root);

    if settings.clean_anchor_font_tags {
        for anchor in root.descendant_elements() {
            if !anchor.is_named("a") {
                continue;
            }
            for el in anchor.descendant_elements() {
                if el.is_named("font") || el.is_named("u") {
                    el.unwrap_children();
                }
            }
        }
    }

    if let Some(selector) = compile_selector(settings.remove_tags.as_deref()) {
        for el in root.descendant_elements() {
            if selector.matches(&el) {
                el.unwrap_children();
            }
        }
    }

    if let Some(selector) = compile_selector(settings.keep_tags.as_deref()) {
        for el in root.descendant_elements() {
            if !selector.matches(&el) {
                el.unwrap_children();
            }
        }
    }

    for el in root.descendant_elements() {
        if !el.is_named("span") {
            continue;
        }
        if settings.remove_spans {
            el.unwrap_children();
        } else if el.child_count() == 0 {
            el.detach();
        } else if el.attr_count() == 0 {
            el.unwrap_children();
        }
    }

    if settings.remove_empty_paragraphs {
        for el in root.descendant_elements() {
            if el.is_named("p") && EMPTY_PARAGRAPH.is_match(&fragment::inner_html(&el)) {
                el.detach();
            }
        }
    }
}

/// Legacy `width`/`height` attributes on table elements become inline
/// styles; bare numeric values gain a `px` unit.
fn convert_table_sizing(root: &NodeRef) {
    for el in root.descendant_elements() {
        let Some(tag) = el.tag_name() else {
            continue;
        };
        if !is_table_sizing_tag(&tag) {
            continue;
        }
        for dimension in ["width", "height"] {
            let Some(value) = el.attr(dimension) else {
                continue;
            };
            el.remove_attr(dimension);
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let css_value = if value.bytes().all(|b| b.is_ascii_digit()) {
                format!("{value}px")
            } else {
                value.to_string()
            };
            let mut entries = style::parse(&el.attr("style").unwrap_or_default());
            style::set(&mut entries, dimension, &css_value);
            el.set_attr("style", &style::serialize(&entries));
        }
    }
}

/// Local and data-URI images cannot survive serialization; mark them for
/// upload or drop them. Everything else gets its URL converted.
fn process_images(settings: &PasteSettings, urls: &dyn UrlConverter, root: &NodeRef) {
    for img in root.descendant_elements() {
        if !img.is_named("img") {
            continue;
        }
        let src = img.attr("src").unwrap_or_default();
        let scheme = src.trim().to_ascii_lowercase();
        if scheme.is_empty() || scheme.starts_with("data:") || scheme.starts_with("file:") {
            if settings.upload_data_images {
                img.set_attr(UPLOAD_MARKER_ATTR, "1");
            } else {
                img.detach();
            }
        } else {
            let converted = urls.convert(&src);
            if converted != src {
                img.set_attr("src", &converted);
            }
        }
    }
}

fn compile_selector(source: Option<&str>) -> Option<Selector> {
    let source = source?;
    match Selector::compile(source) {
        Ok(selector) => Some(selector),
        Err(err) => {
            warn!(target: "vellum::paste", selector = source, %err, "ignoring bad selector");
            None
        }
    }
}

/// The assembled pipeline: settings, collaborators, and the two observer
/// chains with the built-in passes pre-registered.
pub struct Paster {
    pre: Observers<PasteContext>,
    post: Observers<PasteNodeContext>,
}

impl Paster {
    /// A pipeline with identity collaborators.
    pub fn new(settings: PasteSettings) -> Self {
        Self::with_collaborators(settings, Rc::new(Passthrough), Rc::new(Passthrough))
    }

    /// A pipeline delegating word-filtering and URL rewriting to the host.
    pub fn with_collaborators(
        settings: PasteSettings,
        word: Rc<dyn WordFilter>,
        urls: Rc<dyn UrlConverter>,
    ) -> Self {
        let settings = Rc::new(settings);
        let mut pre = Observers::new();
        let mut post = Observers::new();
        {
            let settings = Rc::clone(&settings);
            let word = Rc::clone(&word);
            pre.add(move |ctx: &mut PasteContext| {
                pre_process(&settings, word.as_ref(), ctx);
                true
            });
        }
        post.add(move |ctx: &mut PasteNodeContext| {
            post_process(&settings, word.as_ref(), urls.as_ref(), ctx);
            true
        });
        Paster { pre, post }
    }

    /// The string-stage observer chain. Handlers added here run after the
    /// built-in pre-processing.
    pub fn pre_observers(&mut self) -> &mut Observers<PasteContext> {
        &mut self.pre
    }

    /// The tree-stage observer chain. Handlers added here run after the
    /// built-in post-processing.
    pub fn post_observers(&mut self) -> &mut Observers<PasteNodeContext> {
        &mut self.post
    }

    /// Run the full pipeline over clipboard markup. `None` when an observer
    /// cancelled the paste.
    pub fn paste(&mut self, markup: &str) -> Option<String> {
        let word_content = is_word_content(markup);
        debug!(target: "vellum::paste", len = markup.len(), word_content, "paste");

        let mut ctx = PasteContext::new(markup);
        ctx.word_content = word_content;
        if !self.pre.dispatch(&mut ctx) {
            debug!(target: "vellum::paste", "cancelled in pre-process");
            return None;
        }

        let mut node_ctx = PasteNodeContext::new(fragment::parse(&ctx.content));
        node_ctx.word_content = ctx.word_content;
        node_ctx.plain_text = ctx.plain_text;
        if !self.post.dispatch(&mut node_ctx) {
            debug!(target: "vellum::paste", "cancelled in post-process");
            return None;
        }

        Some(fragment::inner_html(&node_ctx.root))
    }
}
