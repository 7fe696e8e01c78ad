//! Template interpolation for query strings
//!
//! Handles `<%=parameter["Name"]%>` placeholders in query templates such as
//! `projects?is_active=<%=parameter["Is Active"]%>`. Values are inserted
//! literally and never re-scanned for further placeholders.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for matching placeholders: <%=parameter["Name"]%>
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<%=\s*parameter\["((?:[^"\\]|\\.)*)"\]\s*%>"#).unwrap()
});

/// Resolve every placeholder in `template` against `parameters`
///
/// Fails with [`Error::UnresolvedParameter`] naming every placeholder that
/// has no matching parameter.
pub fn resolve(template: &str, parameters: &[(String, String)]) -> Result<String> {
    let missing: Vec<String> = placeholder_names(template)
        .into_iter()
        .filter(|name| lookup(parameters, name).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(Error::unresolved(missing.join(", ")));
    }

    let resolved = PLACEHOLDER_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let name = unescape(&cap[1]);
        lookup(parameters, &name).unwrap_or_default().to_string()
    });

    Ok(resolved.into_owned())
}

/// Escape a value so it survives inside a double-quoted template literal
///
/// Only backslash and double-quote are escaped.
pub fn encode_parameter(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Check if a string contains placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}

/// Extract all parameter names from a template, in order of appearance
pub fn placeholder_names(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| unescape(&cap[1]))
        .collect()
}

fn lookup<'a>(parameters: &'a [(String, String)], name: &str) -> Option<&'a str> {
    parameters
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Undo `encode_parameter` on a placeholder name
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}
