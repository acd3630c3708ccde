//! Style retention: keep only a configured allow-list of CSS properties on
//! pasted elements.
//!
//! Configuration lists name either longhand properties or shorthand groups;
//! groups expand to their longhands before filtering so that `border` in a
//! retain list keeps `border-top-width` on an element. A remove list is
//! subtracted after expansion. Without a retain list, the remove list alone
//! acts as a deny list over otherwise untouched styles.

use std::collections::HashSet;

use vellum_dom::{NodeRef, style};
use vellum_dom::schema::is_media_tag;

use crate::STYLE_SHADOW_ATTR;
use crate::settings::PasteSettings;

const BORDER_LONGHANDS: &[&str] = &[
    "border",
    "border-width",
    "border-style",
    "border-color",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-top-width",
    "border-top-style",
    "border-top-color",
    "border-right-width",
    "border-right-style",
    "border-right-color",
    "border-bottom-width",
    "border-bottom-style",
    "border-bottom-color",
    "border-left-width",
    "border-left-style",
    "border-left-color",
];

const FONT_LONGHANDS: &[&str] = &[
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "font-stretch",
    "line-height",
];

enum Mode {
    /// Keep only these properties.
    Retain(HashSet<String>),
    /// Keep everything except these.
    Deny(HashSet<String>),
}

pub struct StyleRetention {
    mode: Mode,
}

impl StyleRetention {
    /// Build the engine from settings. `None` when neither list is
    /// configured - styles then pass through untouched.
    pub fn from_settings(settings: &PasteSettings) -> Option<StyleRetention> {
        let retain = settings.retain_style_properties.as_deref();
        let remove = settings.remove_style_properties.as_deref();
        match (retain, remove) {
            (None, None) => None,
            (Some(keep), remove) => {
                let mut set = expand_list(keep);
                if let Some(remove) = remove {
                    for prop in expand_list(remove) {
                        set.remove(&prop);
                    }
                }
                Some(StyleRetention {
                    mode: Mode::Retain(set),
                })
            }
            (None, Some(remove)) => Some(StyleRetention {
                mode: Mode::Deny(expand_list(remove)),
            }),
        }
    }

    /// Does the configuration keep this (lowercase) property?
    pub fn keeps(&self, property: &str) -> bool {
        match &self.mode {
            Mode::Retain(set) => set.contains(property),
            Mode::Deny(set) => !set.contains(property),
        }
    }

    /// Rewrite every descendant's inline style to the retained subset.
    ///
    /// Elements whose whole style is dropped lose the attribute and its
    /// internal shadow; a plain span left with no attributes at all carries
    /// no presentational value and is unwrapped.
    pub fn apply(&self, root: &NodeRef) {
        for el in root.descendant_elements() {
            let Some(declaration) = el.attr("style") else {
                continue;
            };
            let entries: Vec<_> = style::parse(&declaration)
                .into_iter()
                .filter(|(name, _)| self.keeps(name))
                .collect();
            // Stale after any rewrite; the serializer regenerates it.
            el.remove_attr(STYLE_SHADOW_ATTR);
            if entries.is_empty() {
                el.remove_attr("style");
                if el.is_named("span") && el.attr_count() == 0 {
                    el.unwrap_children();
                }
            } else {
                el.set_attr("style", &style::serialize(&entries));
            }
        }
    }
}

/// Expand a comma/space-delimited property list, replacing shorthand group
/// names with their longhands.
fn expand_list(list: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    for name in list.split([',', ' ']) {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        match name.as_str() {
            "border" => out.extend(BORDER_LONGHANDS.iter().map(|s| s.to_string())),
            "font" => out.extend(FONT_LONGHANDS.iter().map(|s| s.to_string())),
            "padding" | "margin" => {
                out.insert(name.clone());
                for side in ["top", "bottom", "right", "left"] {
                    out.insert(format!("{name}-{side}"));
                }
            }
            _ => {
                out.insert(name);
            }
        }
    }
    out
}

/// Convert the legacy `align` attribute to its CSS equivalent and drop it.
///
/// Media-like elements center via auto margins and float left/right; other
/// elements use `text-align`.
pub fn convert_align(root: &NodeRef) {
    for el in root.descendant_elements() {
        let Some(align) = el.attr("align") else {
            continue;
        };
        el.remove_attr("align");
        let align = align.trim().to_ascii_lowercase();
        if !matches!(align.as_str(), "left" | "right" | "center") {
            continue;
        }

        let media = el
            .tag_name()
            .is_some_and(|tag| is_media_tag(&tag));
        let mut entries = style::parse(&el.attr("style").unwrap_or_default());
        if media {
            if align == "center" {
                style::set(&mut entries, "margin", "auto");
                style::set(&mut entries, "display", "block");
            } else {
                style::set(&mut entries, "float", &align);
            }
        } else {
            style::set(&mut entries, "text-align", &align);
        }
        el.set_attr("style", &style::serialize(&entries));
    }
}
