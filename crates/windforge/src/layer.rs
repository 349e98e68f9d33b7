//! Output layers.
//!
//! Plugin output is partitioned into three [`LayerBucket`]s. Each bucket
//! keeps its [`RuleGroup`]s in the exact order the `add_*` calls happened,
//! across all plugins.

use serde::Serialize;

use crate::node::RuleNode;
use crate::variants::{marker_prelude, VariantList};

/// One of the three output partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Base,
    Components,
    Utilities,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Base, Layer::Components, Layer::Utilities];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::Components => "components",
            Layer::Utilities => "utilities",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rules produced by a single `add_*` call, with their pending variants.
///
/// An empty variant list means the rules are emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleGroup {
    pub nodes: Vec<RuleNode>,
    pub variants: VariantList,
}

impl RuleGroup {
    pub fn new(nodes: Vec<RuleNode>, variants: VariantList) -> Self {
        Self { nodes, variants }
    }

    /// Serializes the group, inside an `@variants` marker when it has variants.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out, 0);
        out
    }

    pub(crate) fn write_css(&self, out: &mut String, depth: usize) {
        if self.variants.is_empty() {
            for node in &self.nodes {
                node.write_css(out, depth);
            }
            return;
        }

        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(&marker_prelude(&self.variants));
        out.push_str(" {\n");
        for node in &self.nodes {
            node.write_css(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

/// Ordered rule groups for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerBucket {
    layer: Layer,
    groups: Vec<RuleGroup>,
}

impl LayerBucket {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            groups: Vec::new(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn push(&mut self, group: RuleGroup) {
        log::trace!(
            "{} <- {} node(s), variants [{}]",
            self.layer,
            group.nodes.len(),
            group.variants.to_params()
        );
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups.iter()
    }

    /// Serializes all groups inside one `@layer <name>` block.
    ///
    /// An empty bucket serializes to an empty string.
    pub fn to_css(&self) -> String {
        if self.groups.is_empty() {
            return String::new();
        }
        let mut out = format!("@layer {} {{\n", self.layer);
        for group in &self.groups {
            group.write_css(&mut out, 1);
        }
        out.push_str("}\n");
        out
    }
}

/// The three buckets produced by one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub base: LayerBucket,
    pub components: LayerBucket,
    pub utilities: LayerBucket,
}

impl Output {
    pub fn new() -> Self {
        Self {
            base: LayerBucket::new(Layer::Base),
            components: LayerBucket::new(Layer::Components),
            utilities: LayerBucket::new(Layer::Utilities),
        }
    }

    pub fn bucket(&self, layer: Layer) -> &LayerBucket {
        match layer {
            Layer::Base => &self.base,
            Layer::Components => &self.components,
            Layer::Utilities => &self.utilities,
        }
    }

    pub fn bucket_mut(&mut self, layer: Layer) -> &mut LayerBucket {
        match layer {
            Layer::Base => &mut self.base,
            Layer::Components => &mut self.components,
            Layer::Utilities => &mut self.utilities,
        }
    }

    /// Serializes base, components and utilities, in that order.
    pub fn to_css(&self) -> String {
        Layer::ALL
            .iter()
            .map(|layer| self.bucket(*layer).to_css())
            .collect()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Declaration;

    fn group(selector: &str, variants: &[&str]) -> RuleGroup {
        RuleGroup::new(
            vec![RuleNode::new(selector).with_declaration(Declaration::new("top", "0"))],
            variants.iter().copied().collect(),
        )
    }

    #[test]
    fn test_group_without_variants_has_no_marker() {
        assert_eq!(group(".a", &[]).to_css(), ".a {\n  top: 0;\n}\n");
    }

    #[test]
    fn test_group_with_variants_has_marker() {
        assert_eq!(
            group(".a", &["responsive", "hover"]).to_css(),
            "@variants responsive, hover {\n  .a {\n    top: 0;\n  }\n}\n"
        );
    }

    #[test]
    fn test_empty_bucket_serializes_to_nothing() {
        assert_eq!(LayerBucket::new(Layer::Base).to_css(), "");
    }

    #[test]
    fn test_bucket_keeps_push_order() {
        let mut bucket = LayerBucket::new(Layer::Utilities);
        bucket.push(group(".first", &[]));
        bucket.push(group(".second", &["hover"]));
        let selectors: Vec<_> = bucket
            .iter()
            .map(|g| g.nodes[0].selector.as_str())
            .collect();
        assert_eq!(selectors, vec![".first", ".second"]);
        assert!(bucket.to_css().starts_with("@layer utilities {\n  .first {"));
    }

    #[test]
    fn test_output_to_css_orders_layers() {
        let mut output = Output::new();
        output.utilities.push(group(".u", &[]));
        output.base.push(group("h1", &[]));
        let css = output.to_css();
        let base_at = css.find("@layer base").unwrap();
        let utilities_at = css.find("@layer utilities").unwrap();
        assert!(base_at < utilities_at);
        assert!(!css.contains("@layer components"));
    }

    #[test]
    fn test_layer_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Layer::Components).unwrap(),
            "\"components\""
        );
    }
}
