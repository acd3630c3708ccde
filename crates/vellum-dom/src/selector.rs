//! Compiled tag-name selectors for paste keep/remove configuration.
//!
//! Supports the subset the paste settings actually use: comma-separated
//! simple selectors over element tag names (`meta,link,style`), the
//! universal selector `*`, and `:not(...)` negation with a nested
//! comma-separated list (`*:not(p,br,strong)`). This is a compiled
//! predicate, not a CSS engine; anything richer is rejected at compile time
//! so the pipeline can fall back to its defaults.

use smol_str::SmolStr;
use thiserror::Error;

use crate::node::NodeRef;
use crate::predicate::is_element;

/// Errors from [`Selector::compile`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector string contained no selectors.
    #[error("empty selector")]
    Empty,

    /// A component wasn't a tag name, `*`, or `:not(...)`.
    #[error("unsupported selector component: {0:?}")]
    Unsupported(String),

    /// Unbalanced parentheses in a `:not(...)` clause.
    #[error("unbalanced parentheses in selector: {0:?}")]
    Unbalanced(String),
}

/// One comma-separated alternative: an optional tag constraint plus any
/// number of `:not(...)` clauses.
#[derive(Debug, Clone)]
struct Compound {
    /// `None` means `*`.
    tag: Option<SmolStr>,
    not: Vec<Compound>,
}

impl Compound {
    fn matches_tag(&self, tag: &str) -> bool {
        match &self.tag {
            Some(own) => own.as_str() == tag,
            None => true,
        }
    }

    fn matches(&self, tag: &str) -> bool {
        self.matches_tag(tag) && !self.not.iter().any(|inner| inner.matches(tag))
    }
}

/// A compiled selector list.
#[derive(Debug, Clone)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Compile a comma-separated selector list.
    pub fn compile(source: &str) -> Result<Selector, SelectorError> {
        let alternatives = split_top_level(source)?
            .into_iter()
            .map(|part| compile_compound(&part))
            .collect::<Result<Vec<_>, _>>()?;
        if alternatives.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { alternatives })
    }

    /// Does any alternative match this node? Non-elements never match.
    pub fn matches(&self, node: &NodeRef) -> bool {
        if !is_element(node) {
            return false;
        }
        let Some(tag) = node.tag_name() else {
            return false;
        };
        self.alternatives.iter().any(|alt| alt.matches(&tag))
    }
}

/// Split on commas outside parentheses, trimming and dropping empties.
fn split_top_level(source: &str) -> Result<Vec<String>, SelectorError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in source.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SelectorError::Unbalanced(source.to_string()))?;
                current.push(c);
            }
            ',' if depth == 0 => {
                let part = current.trim().to_string();
                if !part.is_empty() {
                    parts.push(part);
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(SelectorError::Unbalanced(source.to_string()));
    }
    let last = current.trim().to_string();
    if !last.is_empty() {
        parts.push(last);
    }
    Ok(parts)
}

fn compile_compound(part: &str) -> Result<Compound, SelectorError> {
    let mut rest = part;
    let mut tag = None;

    if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
    } else if let Some(end) = rest.find(':') {
        let name = &rest[..end];
        if !name.is_empty() {
            tag = Some(compile_tag(name, part)?);
        }
        rest = &rest[end..];
    } else {
        return Ok(Compound {
            tag: Some(compile_tag(rest, part)?),
            not: Vec::new(),
        });
    }

    let mut not = Vec::new();
    while !rest.is_empty() {
        let Some(inner_start) = rest.strip_prefix(":not(") else {
            return Err(SelectorError::Unsupported(part.to_string()));
        };
        let close = find_balanced_close(inner_start)
            .ok_or_else(|| SelectorError::Unbalanced(part.to_string()))?;
        let inner = &inner_start[..close];
        for sub in split_top_level(inner)? {
            not.push(compile_compound(&sub)?);
        }
        rest = &inner_start[close + 1..];
    }

    Ok(Compound { tag, not })
}

fn compile_tag(name: &str, part: &str) -> Result<SmolStr, SelectorError> {
    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(SmolStr::new(name.to_ascii_lowercase()))
    } else {
        Err(SelectorError::Unsupported(part.to_string()))
    }
}

/// Index of the `)` closing the implicit `(` already consumed.
fn find_balanced_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str) -> NodeRef {
        NodeRef::element(tag)
    }

    #[test]
    fn test_tag_list() {
        let sel = Selector::compile("meta, link,style").unwrap();
        assert!(sel.matches(&el("meta")));
        assert!(sel.matches(&el("STYLE")));
        assert!(!sel.matches(&el("p")));
        assert!(!sel.matches(&NodeRef::text("x")));
    }

    #[test]
    fn test_universal() {
        let sel = Selector::compile("*").unwrap();
        assert!(sel.matches(&el("anything")));
        assert!(!sel.matches(&NodeRef::comment("c")));
    }

    #[test]
    fn test_not_negation() {
        let sel = Selector::compile("*:not(p,br,strong)").unwrap();
        assert!(!sel.matches(&el("p")));
        assert!(!sel.matches(&el("br")));
        assert!(sel.matches(&el("span")));
    }

    #[test]
    fn test_bare_not() {
        let sel = Selector::compile(":not(span)").unwrap();
        assert!(sel.matches(&el("p")));
        assert!(!sel.matches(&el("span")));
    }

    #[test]
    fn test_nested_not() {
        // Double negation: only spans match.
        let sel = Selector::compile("*:not(*:not(span))").unwrap();
        assert!(sel.matches(&el("span")));
        assert!(!sel.matches(&el("p")));
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(Selector::compile("").unwrap_err(), SelectorError::Empty);
        assert_eq!(Selector::compile(" , ,").unwrap_err(), SelectorError::Empty);
        assert!(matches!(
            Selector::compile("p:not(span").unwrap_err(),
            SelectorError::Unbalanced(_)
        ));
        assert!(matches!(
            Selector::compile("p[x=1]").unwrap_err(),
            SelectorError::Unsupported(_)
        ));
        assert!(matches!(
            Selector::compile("p:hover").unwrap_err(),
            SelectorError::Unsupported(_)
        ));
    }
}
