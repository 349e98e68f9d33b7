//! Variant lists and the variant wrapper.
//!
//! A [`VariantList`] names the modifiers (`responsive`, `hover`, ...) a
//! downstream expansion stage applies to a rule group. This crate only
//! attaches the list; it never expands it.
//!
//! Plugins can also declare variants themselves with an `@variants <list>`
//! block. [`wrap`] recognizes such groups and leaves them alone, so they are
//! never wrapped twice.

use serde::Serialize;
use serde_json::Value;

use crate::layer::RuleGroup;
use crate::node::RuleNode;

/// Name of the pseudo at-rule used as a self-declared variant marker.
pub const VARIANTS_AT_RULE: &str = "variants";

/// An ordered set of variant names, deduplicated on first occurrence.
///
/// # Example
///
/// ```rust
/// use windforge::VariantList;
///
/// let list: VariantList = ["responsive", "hover", "responsive"].into();
/// assert_eq!(list.as_slice(), ["responsive", "hover"]);
/// assert_eq!(list.to_params(), "responsive, hover");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariantList(Vec<String>);

impl VariantList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a variant unless it is already present.
    ///
    /// Returns `true` if the variant was added.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|v| v == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|v| v == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Parses a comma-separated prelude such as `"responsive, hover"`.
    pub fn parse(params: &str) -> Self {
        params.split(',').map(str::trim).collect()
    }

    /// Reads a list from a config value. Non-string entries are skipped;
    /// anything but an array yields an empty list.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Self::new(),
        }
    }

    /// Renders the list as an at-rule prelude (`"responsive, hover"`).
    pub fn to_params(&self) -> String {
        self.0.join(", ")
    }

    pub(crate) fn insert_at(&mut self, index: usize, names: &[String]) {
        let mut at = index.min(self.0.len());
        for name in names {
            if name.is_empty() || self.contains(name) {
                continue;
            }
            self.0.insert(at, name.clone());
            at += 1;
        }
    }

    pub(crate) fn remove_all(&mut self, names: &[String]) {
        self.0.retain(|v| !names.contains(v));
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for VariantList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.push(name);
        }
        list
    }
}

impl<S: Into<String>> From<Vec<S>> for VariantList {
    fn from(names: Vec<S>) -> Self {
        names.into_iter().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for VariantList {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a VariantList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns the declared list if `node` is an `@variants` marker.
pub fn parse_marker(node: &RuleNode) -> Option<VariantList> {
    if node.at_rule_name()? != VARIANTS_AT_RULE {
        return None;
    }
    node.at_rule_params().map(VariantList::parse)
}

/// Builds the canonical marker prelude for a list (`@variants a, b`).
pub fn marker_prelude(variants: &VariantList) -> String {
    if variants.is_empty() {
        format!("@{}", VARIANTS_AT_RULE)
    } else {
        format!("@{} {}", VARIANTS_AT_RULE, variants.to_params())
    }
}

/// Attaches a variant list to a compiled group.
///
/// If the group already declares its own variants through a top-level
/// `@variants` block, the supplied list is ignored: a lone marker is lifted
/// so its declared list becomes the group's list, and a marker mixed with
/// other rules is kept as-is with no outer list.
pub fn wrap(mut nodes: Vec<RuleNode>, variants: VariantList) -> RuleGroup {
    if !nodes.iter().any(|n| parse_marker(n).is_some()) {
        return RuleGroup::new(nodes, variants);
    }

    if nodes.len() == 1 && nodes[0].declarations.is_empty() {
        if let Some(declared) = parse_marker(&nodes[0]) {
            let marker = nodes.remove(0);
            return RuleGroup::new(marker.children, declared);
        }
    }

    RuleGroup::new(nodes, VariantList::new())
}
