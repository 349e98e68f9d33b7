//! Dotted-path lookups and theme value normalization.

use serde_json::Value;

/// Theme sections whose two-element values are `[value, extra]`; only the
/// first element is used as a declaration value.
const FIRST_OF_PAIR_SECTIONS: &[&str] = &["fontSize", "outline"];

/// Theme sections whose list values are comma-joined into one value.
const JOINED_SECTIONS: &[&str] = &[
    "fontFamily",
    "boxShadow",
    "transitionProperty",
    "transitionDuration",
    "transitionDelay",
    "transitionTimingFunction",
    "backgroundImage",
    "backgroundSize",
    "backgroundColor",
    "cursor",
    "animation",
];

/// Splits a lookup path into segments.
///
/// Dots separate segments outside brackets; a bracketed part is always one
/// segment, so `fontSize.sm`, `fontSize[sm]`, `spacing[2.5]` and
/// `colors.gray.100` all work. Quotes around a bracketed key are dropped.
/// An empty path has no segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        let segment;
        if let Some(inner) = rest.strip_prefix('[') {
            let end = inner.find(']').unwrap_or(inner.len());
            segment = unquote(&inner[..end]);
            rest = inner.get(end + 1..).unwrap_or("");
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            segment = &rest[..end];
            rest = &rest[end..];
        }
        rest = rest.strip_prefix('.').unwrap_or(rest);
        if !segment.is_empty() {
            segments.push(segment);
        }
    }
    segments
}

fn unquote(key: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| key.strip_prefix(*q).and_then(|k| k.strip_suffix(*q)))
        .unwrap_or(key)
}

/// Returns the value at `path`, or `None` if any segment is missing.
///
/// Numeric segments index into arrays. An empty path returns `root`.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    lookup_segments(root, &path_segments(path))
}

pub(crate) fn lookup_segments<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Normalizes a value read from the theme section `section`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use windforge::config::normalize_theme_value;
///
/// assert_eq!(
///     normalize_theme_value("fontSize", json!(["14px", "20px"])),
///     json!("14px")
/// );
/// assert_eq!(
///     normalize_theme_value("boxShadow", json!(["width", "height"])),
///     json!("width, height")
/// );
/// ```
pub fn normalize_theme_value(section: &str, value: Value) -> Value {
    match value {
        Value::Array(mut items) if FIRST_OF_PAIR_SECTIONS.contains(&section) => {
            if items.is_empty() {
                Value::Array(items)
            } else {
                items.swap_remove(0)
            }
        }
        Value::Array(items) if JOINED_SECTIONS.contains(&section) => Value::String(
            items
                .iter()
                .map(value_to_css_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => other,
    }
}

/// Renders a scalar as it would appear in a declaration.
pub(crate) fn value_to_css_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JavaScript-style truthiness, used for boolean-ish config switches.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
