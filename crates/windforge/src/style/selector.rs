//! Selector rewriting: prefixing, importance and identifier escaping.
//!
//! Selectors are scanned with the `cssparser` tokenizer so class tokens are
//! found the way a CSS engine would find them: a `.` delimiter at any depth
//! of functional pseudo-classes (`:not(.a)`), but never inside attribute
//! selectors or strings. Escaped characters stay part of the identifier they
//! belong to (`.w-1\/4` is one class).

use cssparser::{serialize_identifier, ParseError, Parser, ParserInput, Token};

use crate::config::Important;
use crate::node::{is_keyframes_name, RuleNode};

/// What the scanner saw at one token, detached from the token borrow.
enum Step {
    Class,
    Comma,
    Nested,
    Other,
}

#[derive(Default)]
struct SelectorScan {
    /// Byte offsets right after each class `.`.
    class_starts: Vec<usize>,
    /// Byte offsets of top-level commas.
    commas: Vec<usize>,
}

fn scan(selector: &str) -> SelectorScan {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    let mut found = SelectorScan::default();
    scan_block(&mut parser, 0, &mut found);
    found
}

fn scan_block<'i, 't>(parser: &mut Parser<'i, 't>, depth: usize, found: &mut SelectorScan) {
    loop {
        let step = match parser.next_including_whitespace_and_comments() {
            Ok(Token::Delim('.')) => Step::Class,
            Ok(Token::Comma) => Step::Comma,
            Ok(Token::Function(_)) | Ok(Token::ParenthesisBlock) => Step::Nested,
            Ok(_) => Step::Other,
            Err(_) => break,
        };
        match step {
            Step::Class => found.class_starts.push(parser.position().byte_index()),
            Step::Comma if depth == 0 => {
                found.commas.push(parser.position().byte_index() - 1);
            }
            Step::Nested => {
                let _ = parser.parse_nested_block(|nested| {
                    scan_block(nested, depth + 1, found);
                    Ok::<(), ParseError<'i, ()>>(())
                });
            }
            Step::Comma | Step::Other => {}
        }
    }
}

/// Splits a selector list on its top-level commas.
///
/// Commas inside functional pseudo-classes (`:is(.a, .b)`) do not split.
/// Each part is trimmed; empty parts are dropped.
pub fn split_selector_list(selector: &str) -> Vec<String> {
    let found = scan(selector);
    let mut parts = Vec::with_capacity(found.commas.len() + 1);
    let mut start = 0;
    for comma in found.commas.iter().copied().chain(std::iter::once(selector.len())) {
        let part = selector[start..comma].trim();
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        start = (comma + 1).min(selector.len());
    }
    parts
}

/// Inserts `prefix` after the `.` of every class token in `selector`.
///
/// Element names, attributes, pseudo-classes and combinators are untouched.
///
/// # Example
///
/// ```rust
/// use windforge::style::prefix_selector;
///
/// assert_eq!(
///     prefix_selector("tw-", ".btn-blue .w-1/4 > h1.text-xl + a .bar"),
///     ".tw-btn-blue .tw-w-1/4 > h1.tw-text-xl + a .tw-bar",
/// );
/// ```
pub fn prefix_selector(prefix: &str, selector: &str) -> String {
    if prefix.is_empty() {
        return selector.to_string();
    }
    let found = scan(selector);
    let mut out = String::with_capacity(selector.len() + prefix.len() * found.class_starts.len());
    let mut last = 0;
    for at in found.class_starts {
        out.push_str(&selector[last..at]);
        out.push_str(prefix);
        last = at;
    }
    out.push_str(&selector[last..]);
    out
}

/// Escapes a string for use as a CSS identifier (`top-1/4` → `top-1\/4`).
///
/// Escaping is never applied automatically; plugins call this when they
/// build class names from arbitrary values.
pub fn escape(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    // Writing into a String cannot fail.
    let _ = serialize_identifier(token, &mut out);
    out
}

/// Prefixes every class in every style rule of `nodes`.
///
/// Keyframe frames (`from`, `50%`) are skipped.
pub fn apply_prefix(nodes: &mut [RuleNode], prefix: &str, respect: bool) {
    if !respect || prefix.is_empty() {
        return;
    }
    for node in nodes {
        node.walk_rules_mut(&mut |rule, enclosing| {
            if enclosing.is_some_and(is_keyframes_name) {
                return;
            }
            rule.selector = prefix_selector(prefix, &rule.selector);
        });
    }
}

/// Applies the `important` setting to every style rule of `nodes`.
///
/// [`Important::Flag`] appends `!important` to each declaration that does
/// not already carry it. [`Important::Scope`] prefixes each selector of the
/// list with the scope selector and leaves declarations alone.
pub fn apply_important(nodes: &mut [RuleNode], important: &Important, respect: bool) {
    if !respect {
        return;
    }
    match important {
        Important::Off => {}
        Important::Flag => {
            for node in nodes {
                node.walk_rules_mut(&mut |rule, enclosing| {
                    if enclosing.is_some_and(is_keyframes_name) {
                        return;
                    }
                    for decl in &mut rule.declarations {
                        if !decl.is_important() {
                            decl.value.push_str(" !important");
                        }
                    }
                });
            }
        }
        Important::Scope(scope) => {
            for node in nodes {
                node.walk_rules_mut(&mut |rule, enclosing| {
                    if enclosing.is_some_and(is_keyframes_name) {
                        return;
                    }
                    rule.selector = split_selector_list(&rule.selector)
                        .iter()
                        .map(|s| format!("{} {}", scope, s))
                        .collect::<Vec<_>>()
                        .join(", ");
                });
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prefix_adds_prefix_once_per_class(
            classes in prop::collection::vec("[a-z][a-z0-9-]{0,6}", 1..5),
        ) {
            let selector = classes
                .iter()
                .map(|c| format!(".{}", c))
                .collect::<Vec<_>>()
                .join(" > ");
            let prefixed = prefix_selector("tw-", &selector);
            prop_assert_eq!(prefixed.matches(".tw-").count(), classes.len());
            prop_assert_eq!(prefixed.len(), selector.len() + 3 * classes.len());
        }

        #[test]
        fn escape_produces_single_backslash_per_special(
            head in "[a-z]{1,4}",
            tail in "[a-z0-9]{0,4}",
            special in prop::sample::select(vec!['/', '.', ':']),
        ) {
            let token = format!("{}{}{}", head, special, tail);
            let escaped = escape(&token);
            prop_assert_eq!(escaped, format!("{}\\{}{}", head, special, tail));
        }
    }
}
