//! Inline `style` attribute parsing and serialization.
//!
//! Order-preserving and lenient: stray semicolons and malformed entries are
//! dropped rather than rejected. Property names are lowercased; values keep
//! their original case.

/// Parse an inline style declaration into ordered `(property, value)` pairs.
pub fn parse(declaration: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for entry in declaration.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((name, value)) = entry.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        out.push((name, value.to_string()));
    }
    out
}

/// Serialize `(property, value)` pairs back to declaration form:
/// `name: value; name: value;`.
pub fn serialize(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in entries {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

/// Get a property value from parsed entries.
pub fn get<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Set (or overwrite in place) a property.
pub fn set(entries: &mut Vec<(String, String)>, name: &str, value: &str) {
    let name = name.to_ascii_lowercase();
    if let Some(slot) = entries.iter_mut().find(|(n, _)| *n == name) {
        slot.1 = value.to_string();
    } else {
        entries.push((name, value.to_string()));
    }
}
