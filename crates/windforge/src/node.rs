//! Rule and declaration primitives.
//!
//! Every stage of the engine produces or consumes [`RuleNode`] trees: the
//! style compiler builds them, the selector transforms rewrite them in place,
//! and layer buckets serialize them.
//!
//! A node whose selector starts with `@` is an at-rule block (`@media`,
//! `@keyframes`, `@variants`); everything else is a style rule. At-rules with
//! an empty body serialize as statements (`@import "x";`).

use serde::Serialize;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    /// Creates a declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the value already carries `!important`.
    pub fn is_important(&self) -> bool {
        self.value.trim_end().ends_with("!important")
    }
}

/// A selector (or at-rule prelude) with its declarations and nested blocks.
///
/// Children serialize in insertion order, after the node's own declarations.
///
/// # Example
///
/// ```rust
/// use windforge::{Declaration, RuleNode};
///
/// let rule = RuleNode::new(".object-fill").with_declaration(Declaration::new("object-fit", "fill"));
/// assert_eq!(rule.to_css(), ".object-fill {\n  object-fit: fill;\n}\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleNode {
    pub selector: String,
    pub declarations: Vec<Declaration>,
    pub children: Vec<RuleNode>,
}

impl RuleNode {
    /// Creates an empty node for the given selector or at-rule prelude.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends a declaration, returning the node for chaining.
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Appends a child block, returning the node for chaining.
    pub fn with_child(mut self, child: RuleNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_declaration(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn push_child(&mut self, child: RuleNode) {
        self.children.push(child);
    }

    /// Returns `true` if this node is an at-rule block.
    pub fn is_at_rule(&self) -> bool {
        self.selector.starts_with('@')
    }

    /// Returns the at-rule name without the `@` (`"media"` for `@media (...)`).
    pub fn at_rule_name(&self) -> Option<&str> {
        let rest = self.selector.strip_prefix('@')?;
        Some(rest.split_whitespace().next().unwrap_or(""))
    }

    /// Returns the at-rule prelude after the name, trimmed.
    pub fn at_rule_params(&self) -> Option<&str> {
        let rest = self.selector.strip_prefix('@')?;
        let name_len = rest.split_whitespace().next().map_or(0, str::len);
        Some(rest.trim_start()[name_len..].trim())
    }

    /// Returns `true` if the node has neither declarations nor children.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.children.is_empty()
    }

    /// Visits every style rule (not at-rule) in this subtree, depth first.
    ///
    /// The callback receives the rule and the name of the at-rule directly
    /// enclosing it, if any. Keyframe frames therefore arrive with
    /// `Some("keyframes")` (or a vendor-prefixed variant of it).
    pub fn walk_rules_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut RuleNode, Option<&str>),
    {
        self.walk_inner(None, f);
    }

    fn walk_inner<F>(&mut self, enclosing: Option<&str>, f: &mut F)
    where
        F: FnMut(&mut RuleNode, Option<&str>),
    {
        if self.is_at_rule() {
            let name = self.at_rule_name().unwrap_or("").to_string();
            for child in &mut self.children {
                child.walk_inner(Some(&name), f);
            }
        } else {
            f(self, enclosing);
            for child in &mut self.children {
                child.walk_inner(None, f);
            }
        }
    }

    /// Serializes the subtree as indented CSS text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out, 0);
        out
    }

    pub(crate) fn write_css(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        if self.is_at_rule() && self.is_empty() {
            out.push_str(&indent);
            out.push_str(&self.selector);
            out.push_str(";\n");
            return;
        }

        out.push_str(&indent);
        out.push_str(&self.selector);
        out.push_str(" {\n");
        for decl in &self.declarations {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(&decl.property);
            out.push_str(": ");
            out.push_str(&decl.value);
            out.push_str(";\n");
        }
        for child in &self.children {
            child.write_css(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

impl std::fmt::Display for RuleNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Returns `true` for `keyframes` and its vendor-prefixed spellings.
pub(crate) fn is_keyframes_name(name: &str) -> bool {
    name.ends_with("keyframes")
}
