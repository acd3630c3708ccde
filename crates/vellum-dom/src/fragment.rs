//! Lenient HTML fragment reader/writer.
//!
//! The paste pipeline flows markup string -> tree -> markup string. A general
//! HTML parser/serializer is out of scope; this module is the minimal
//! collaborator that covers clipboard payloads: elements with attributes,
//! void/self-closing tags, comments, text, and the handful of entities that
//! matter for normalization. Parsing is total - any input produces a tree,
//! mismatched end tags close leniently, and unknown entities pass through as
//! literal text.

use smol_str::SmolStr;

use crate::node::{NodeKind, NodeRef};
use crate::schema::is_void_tag;

/// Parse markup into a fragment root.
pub fn parse(markup: &str) -> NodeRef {
    let root = NodeRef::fragment();
    let mut stack: Vec<NodeRef> = vec![root.clone()];
    let bytes = markup.as_bytes();
    let mut pos = 0usize;
    let mut text_start = 0usize;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        let rest = &markup[pos..];
        if let Some(comment_len) = scan_comment(rest) {
            flush_text(&markup[text_start..pos], &stack);
            let body_end = comment_len.saturating_sub(3).max(4);
            let body = &rest[4..body_end];
            append(&stack, &NodeRef::comment(body));
            pos += comment_len;
            text_start = pos;
        } else if let Some((name, tag_len)) = scan_end_tag(rest) {
            flush_text(&markup[text_start..pos], &stack);
            close_element(&mut stack, &name);
            pos += tag_len;
            text_start = pos;
        } else if let Some(tag) = scan_start_tag(rest) {
            flush_text(&markup[text_start..pos], &stack);
            let element = NodeRef::element(&tag.name);
            for (name, value) in &tag.attrs {
                element.set_attr(name, value);
            }
            append(&stack, &element);
            if !tag.self_closing && !is_void_tag(&element.tag_name().unwrap_or_default()) {
                stack.push(element);
            }
            pos += tag.len;
            text_start = pos;
        } else {
            // Stray '<': literal text.
            pos += 1;
        }
    }
    flush_text(&markup[text_start..], &stack);
    root
}

/// Serialize a node (for elements: including its own tags).
pub fn serialize(node: &NodeRef) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize only the children of a node.
pub fn inner_html(node: &NodeRef) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_node(&child, &mut out);
    }
    out
}

struct StartTag {
    name: SmolStr,
    attrs: Vec<(SmolStr, String)>,
    self_closing: bool,
    /// Total source length including angle brackets.
    len: usize,
}

fn scan_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("<!--") {
        return None;
    }
    match rest[4..].find("-->") {
        Some(end) => Some(4 + end + 3),
        // Unterminated comment swallows the remainder.
        None => Some(rest.len()),
    }
}

fn scan_end_tag(rest: &str) -> Option<(SmolStr, usize)> {
    let body = rest.strip_prefix("</")?;
    let close = body.find('>')?;
    let name = body[..close].trim();
    if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((SmolStr::new(name.to_ascii_lowercase()), close + 3))
}

fn scan_start_tag(rest: &str) -> Option<StartTag> {
    let body = rest.strip_prefix('<')?;
    if !body.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let close = body.find('>')?;
    let mut inner = &body[..close];
    let self_closing = inner.ends_with('/');
    if self_closing {
        inner = &inner[..inner.len() - 1];
    }

    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    let name = SmolStr::new(inner[..name_end].to_ascii_lowercase());
    let attrs = parse_attrs(&inner[name_end..]);
    Some(StartTag {
        name,
        attrs,
        self_closing,
        len: close + 2,
    })
}

fn parse_attrs(mut input: &str) -> Vec<(SmolStr, String)> {
    let mut attrs = Vec::new();
    loop {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }
        let name_end = input
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(input.len());
        if name_end == 0 {
            // Stray '=' or similar; skip one char to make progress.
            input = &input[1..];
            continue;
        }
        let name = SmolStr::new(input[..name_end].to_ascii_lowercase());
        input = input[name_end..].trim_start();

        let value = if let Some(rest) = input.strip_prefix('=') {
            let rest = rest.trim_start();
            if let Some(quoted) = rest.strip_prefix('"') {
                let end = quoted.find('"').unwrap_or(quoted.len());
                input = &quoted[(end + 1).min(quoted.len())..];
                decode_entities(&quoted[..end])
            } else if let Some(quoted) = rest.strip_prefix('\'') {
                let end = quoted.find('\'').unwrap_or(quoted.len());
                input = &quoted[(end + 1).min(quoted.len())..];
                decode_entities(&quoted[..end])
            } else {
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace())
                    .unwrap_or(rest.len());
                input = &rest[end..];
                decode_entities(&rest[..end])
            }
        } else {
            String::new()
        };
        attrs.push((name, value));
    }
    attrs
}

fn flush_text(text: &str, stack: &[NodeRef]) {
    if text.is_empty() {
        return;
    }
    append(stack, &NodeRef::text(&decode_entities(text)));
}

fn append(stack: &[NodeRef], node: &NodeRef) {
    if let Some(top) = stack.last() {
        top.append(node);
    }
}

fn close_element(stack: &mut Vec<NodeRef>, name: &str) {
    // The fragment root at index 0 is never popped.
    let matching = stack
        .iter()
        .skip(1)
        .rposition(|el| el.is_named(name))
        .map(|i| i + 1);
    if let Some(index) = matching {
        stack.truncate(index);
    }
    // Unmatched end tags are ignored.
}

/// Decode the entities the pipeline cares about; unknown ones pass through.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.bytes().take(12).position(|b| b == b';') else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "nbsp" => Some('\u{00A0}'),
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

fn write_node(node: &NodeRef, out: &mut String) {
    match node.kind() {
        NodeKind::Text => {
            if let Some(data) = node.data() {
                escape_text(&data, out);
            }
        }
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&node.data().unwrap_or_default());
            out.push_str("-->");
        }
        NodeKind::Element => {
            let tag = node.tag_name().unwrap_or_default();
            out.push('<');
            out.push_str(&tag);
            for (name, value) in node.attrs() {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                escape_attr(&value, out);
                out.push('"');
            }
            out.push('>');
            if !is_void_tag(&tag) {
                for child in node.children() {
                    write_node(&child, out);
                }
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
        }
        NodeKind::Document | NodeKind::Fragment => {
            for child in node.children() {
                write_node(&child, out);
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = parse("<p>Hello <span style=\"color:red\">World</span></p>");
        let p = root.first_child().unwrap();
        assert!(p.is_named("p"));
        assert_eq!(p.child_count(), 2);
        let span = p.child(1).unwrap();
        assert!(span.is_named("span"));
        assert_eq!(span.attr("style").as_deref(), Some("color:red"));
        assert_eq!(span.text_content(), "World");
    }

    #[test]
    fn test_parse_void_and_self_closing() {
        let root = parse("a<br>b<img src='x.png'/>c");
        let kids = root.children();
        assert_eq!(kids.len(), 5);
        assert!(kids[1].is_named("br"));
        assert_eq!(kids[1].child_count(), 0);
        assert!(kids[3].is_named("img"));
        assert_eq!(kids[4].text_content(), "c");
    }

    #[test]
    fn test_parse_entities() {
        let root = parse("&nbsp;&amp;&lt;&#65;&unknown;");
        assert_eq!(root.text_content(), "\u{00A0}&<A&unknown;");
    }

    #[test]
    fn test_parse_mismatched_end_tags() {
        // </i> never opened, <b> never closed: both are tolerated.
        let root = parse("<p><b>x</i>y</p>z");
        assert_eq!(root.child_count(), 2);
        let p = root.first_child().unwrap();
        assert_eq!(p.text_content(), "xy");
    }

    #[test]
    fn test_parse_comment_and_stray_lt() {
        let root = parse("a<!-- note -->b < c");
        let kids = root.children();
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[1].kind(), NodeKind::Comment);
        assert_eq!(kids[1].data().as_deref(), Some(" note "));
        assert_eq!(kids[2].text_content(), "b < c");
    }

    #[test]
    fn test_parse_unquoted_and_bare_attrs() {
        let root = parse("<td height=50 nowrap>x</td>");
        let td = root.first_child().unwrap();
        assert_eq!(td.attr("height").as_deref(), Some("50"));
        assert_eq!(td.attr("nowrap").as_deref(), Some(""));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let markup = "<p>a &amp; b&nbsp;<br><span style=\"color: red;\">c</span></p>";
        let root = parse(markup);
        assert_eq!(inner_html(&root), markup);
    }

    #[test]
    fn test_serialize_escapes_attrs() {
        let el = NodeRef::element("span");
        el.set_attr("title", "a\"b<c");
        assert_eq!(serialize(&el), "<span title=\"a&quot;b&lt;c\"></span>");
    }

    #[test]
    fn test_parse_is_total() {
        // Garbage in, tree out.
        for junk in ["<", "<<>>", "</>", "<p", "&#xZZ;", "<!---"] {
            let _ = parse(junk);
        }
    }
}
