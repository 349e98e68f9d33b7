//! Compiles declarative style objects into rule trees.
//!
//! A style object is a mapping whose keys are selectors, at-rule preludes
//! or property names:
//!
//! | Key | Value | Result |
//! |-----|-------|--------|
//! | `@media ...`, `@keyframes ...` | mapping | at-rule block, body compiled with the same parent chain |
//! | `backgroundColor` | string / number | declaration `background-color` |
//! | `&:hover`, `h1 &` | mapping | nested rule, `&` replaced by the parent chain |
//! | `> a`, `.icon` | mapping | nested rule, parent chain + space + key |
//! | any | array | each element compiled under the same key, in order |
//!
//! Nested rules are flattened: a rule keeps all of its own declarations and
//! is emitted first, followed by its nested rules in source order. A rule
//! with no declarations of its own is not emitted at all.

use serde_json::{Map, Value};

use super::selector::split_selector_list;
use crate::config::{value_kind, value_to_css_string};
use crate::node::{is_keyframes_name, Declaration, RuleNode};
use crate::variants::{marker_prelude, VariantList, VARIANTS_AT_RULE};

/// Style input accepted by the `add_*` capabilities.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    /// A declarative style object.
    Object(Map<String, Value>),
    /// A prebuilt rule, taken verbatim.
    Node(RuleNode),
    /// Items compiled one after another; nothing is merged across items.
    List(Vec<StyleInput>),
}

impl From<Value> for StyleInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => StyleInput::Object(map),
            Value::Array(items) => StyleInput::List(items.into_iter().map(Self::from).collect()),
            Value::Null => StyleInput::List(Vec::new()),
            other => {
                log::warn!(
                    "ignoring {} style input; expected a mapping or an array",
                    value_kind(&other)
                );
                StyleInput::List(Vec::new())
            }
        }
    }
}

impl From<Map<String, Value>> for StyleInput {
    fn from(map: Map<String, Value>) -> Self {
        StyleInput::Object(map)
    }
}

impl From<RuleNode> for StyleInput {
    fn from(node: RuleNode) -> Self {
        StyleInput::Node(node)
    }
}

impl<T: Into<StyleInput>> From<Vec<T>> for StyleInput {
    fn from(items: Vec<T>) -> Self {
        StyleInput::List(items.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
struct Block {
    declarations: Vec<Declaration>,
    nodes: Vec<RuleNode>,
}

/// Compiles `input` under the selector chain `parent` (`""` at the root).
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use windforge::style::{compile, StyleInput};
///
/// let input = StyleInput::from(json!({
///     ".btn-blue": {
///         "color": "white",
///         "&:hover": { "color": "blue" },
///         "> a": { "color": "red" },
///         "h1 &": { "color": "purple" }
///     }
/// }));
/// let selectors: Vec<_> = compile(&input, "").into_iter().map(|n| n.selector).collect();
/// assert_eq!(selectors, [".btn-blue", ".btn-blue:hover", ".btn-blue > a", "h1 .btn-blue"]);
/// ```
pub fn compile(input: &StyleInput, parent: &str) -> Vec<RuleNode> {
    let mut out = Vec::new();
    compile_into(input, parent, &mut out);
    out
}

fn compile_into(input: &StyleInput, parent: &str, out: &mut Vec<RuleNode>) {
    match input {
        StyleInput::Node(node) => out.push(node.clone()),
        StyleInput::List(items) => {
            for item in items {
                compile_into(item, parent, out);
            }
        }
        StyleInput::Object(map) => {
            let block = compile_block(map, parent);
            if !block.declarations.is_empty() {
                if parent.is_empty() {
                    log::warn!(
                        "dropping {} declaration(s) with no enclosing selector",
                        block.declarations.len()
                    );
                } else {
                    out.push(rule(parent, block.declarations));
                }
            }
            out.extend(block.nodes);
        }
    }
}

fn compile_block(map: &Map<String, Value>, parent: &str) -> Block {
    let mut block = Block::default();
    for (key, value) in map {
        compile_entry(key, value, parent, &mut block);
    }
    block
}

fn compile_entry(key: &str, value: &Value, parent: &str, block: &mut Block) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                compile_entry(key, item, parent, block);
            }
        }
        _ if key.starts_with('@') => block.nodes.push(compile_at_rule(key, value, parent)),
        Value::Object(inner) => {
            let selector = combine_selectors(parent, key);
            let nested = compile_block(inner, &selector);
            if !nested.declarations.is_empty() {
                block.nodes.push(rule(&selector, nested.declarations));
            }
            block.nodes.extend(nested.nodes);
        }
        scalar => block
            .declarations
            .push(Declaration::new(dashify(key), value_to_css_string(scalar))),
    }
}

fn compile_at_rule(key: &str, value: &Value, parent: &str) -> RuleNode {
    let mut node = RuleNode::new(at_rule_prelude(key));
    let Value::Object(inner) = value else {
        // `@import "x"`-style statement.
        node.selector = format!("{} {}", node.selector, value_to_css_string(value));
        return node;
    };

    // Keyframe frames are not selectors and never join the parent chain.
    let chain = if node.at_rule_name().is_some_and(is_keyframes_name) {
        ""
    } else {
        parent
    };
    let block = compile_block(inner, chain);
    if !block.declarations.is_empty() {
        if chain.is_empty() {
            node.declarations = block.declarations;
        } else {
            node.push_child(rule(chain, block.declarations));
        }
    }
    node.children.extend(block.nodes);
    node
}

fn at_rule_prelude(key: &str) -> String {
    let key = key.trim();
    let node = RuleNode::new(key);
    if node.at_rule_name() == Some(VARIANTS_AT_RULE) {
        let params = node.at_rule_params().unwrap_or("");
        return marker_prelude(&VariantList::parse(params));
    }
    key.to_string()
}

fn rule(selector: &str, declarations: Vec<Declaration>) -> RuleNode {
    RuleNode {
        selector: selector.to_string(),
        declarations,
        children: Vec::new(),
    }
}

/// Combines a parent selector chain with a nested key.
///
/// Keys containing `&` have every `&` replaced by the parent; other keys are
/// appended to the parent after a single space. Selector lists on either
/// side distribute over each other, parent-major.
///
/// ```rust
/// use windforge::style::combine_selectors;
///
/// assert_eq!(combine_selectors(".btn", "&:hover"), ".btn:hover");
/// assert_eq!(combine_selectors(".btn", "> a"), ".btn > a");
/// assert_eq!(combine_selectors(".btn", "h1 &"), "h1 .btn");
/// assert_eq!(combine_selectors(".a, .b", "&:focus"), ".a:focus, .b:focus");
/// ```
pub fn combine_selectors(parent: &str, key: &str) -> String {
    let children = split_selector_list(key);
    if children.is_empty() {
        return parent.to_string();
    }
    let mut parents = split_selector_list(parent);
    if parents.is_empty() {
        parents.push(String::new());
    }

    let mut combined = Vec::with_capacity(parents.len() * children.len());
    for p in &parents {
        for c in &children {
            combined.push(if c.contains('&') {
                c.replace('&', p)
            } else if p.is_empty() {
                c.clone()
            } else {
                format!("{} {}", p, c)
            });
        }
    }
    combined.join(", ")
}

/// Converts a camelCase property name to kebab-case.
///
/// Custom properties (`--x`) are kept verbatim, and a leading `ms-` becomes
/// the vendor prefix `-ms-`.
pub fn dashify(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}
