//! Zero-width no-break space handling.
//!
//! `U+FEFF` is reserved as an invisible caret anchor inside otherwise empty
//! inline elements. It must never leak into serialized content, so every
//! layer that reads text data strips it through here.

use std::borrow::Cow;

/// The reserved zero-width marker character.
pub const ZWSP: char = '\u{FEFF}';

/// Is this the reserved zero-width marker?
pub fn is_zwsp(c: char) -> bool {
    c == ZWSP
}

/// Does the string contain the zero-width marker anywhere?
pub fn contains_zwsp(text: &str) -> bool {
    text.contains(ZWSP)
}

/// Strip every occurrence of the zero-width marker.
///
/// Borrows when the input is already clean.
pub fn trim(text: &str) -> Cow<'_, str> {
    if contains_zwsp(text) {
        Cow::Owned(text.chars().filter(|c| !is_zwsp(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}
