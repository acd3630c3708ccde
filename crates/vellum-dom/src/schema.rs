//! Tag classification sets shared across the caret and paste layers.

/// Void (self-closing) elements: no children, no end tag.
pub fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Block-level elements, used to decide whether two caret positions are
/// visually adjacent.
pub fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "tbody"
            | "td"
            | "th"
            | "thead"
            | "tfoot"
            | "tr"
            | "ul"
    )
}

/// Elements whose legacy `width`/`height` attributes get converted to
/// inline styles during paste normalization.
pub fn is_table_sizing_tag(tag: &str) -> bool {
    matches!(tag, "table" | "td" | "th")
}

/// Media-like elements whose legacy `align` attribute converts to
/// `float`/`margin` rather than `text-align`.
pub fn is_media_tag(tag: &str) -> bool {
    matches!(
        tag,
        "audio" | "embed" | "iframe" | "img" | "object" | "video"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tags() {
        assert!(is_void_tag("br"));
        assert!(is_void_tag("img"));
        assert!(!is_void_tag("span"));
        assert!(!is_void_tag("p"));
    }

    #[test]
    fn test_block_tags() {
        assert!(is_block_tag("p"));
        assert!(is_block_tag("td"));
        assert!(!is_block_tag("span"));
        assert!(!is_block_tag("b"));
    }

    #[test]
    fn test_media_tags() {
        assert!(is_media_tag("img"));
        assert!(is_media_tag("iframe"));
        assert!(!is_media_tag("p"));
    }
}
