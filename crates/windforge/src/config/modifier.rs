//! Variant modifiers.
//!
//! Instead of replacing a variant list wholesale, a config layer can edit
//! the list accumulated by the layers below it:
//!
//! ```json
//! { "variants": {
//!     "opacity": { "without": ["responsive"] },
//!     "display": { "before": ["active"], "anchor": "focus" },
//!     "padding": { "after": ["group-hover"], "anchor": "hover" },
//!     "margin":  { "extend": ["first"] }
//! } }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::variants::VariantList;

/// An edit applied to an inherited variant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantModifier {
    /// Removes the named variants.
    Without(Vec<String>),
    /// Appends variants at the end.
    Extend(Vec<String>),
    /// Inserts variants before `anchor`, or at the start.
    Before {
        variants: Vec<String>,
        anchor: Option<String>,
    },
    /// Inserts variants after `anchor`, or at the end.
    After {
        variants: Vec<String>,
        anchor: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ModifierSpec {
    without: Option<Vec<String>>,
    extend: Option<Vec<String>>,
    before: Option<Vec<String>>,
    after: Option<Vec<String>>,
    anchor: Option<String>,
}

impl VariantModifier {
    /// Reads a modifier from a config value.
    ///
    /// Returns `None` unless the value is a mapping with exactly one of
    /// `without`, `extend`, `before` or `after` (plus an optional `anchor`
    /// for the last two).
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let spec: ModifierSpec = serde_json::from_value(value.clone()).ok()?;
        match (spec.without, spec.extend, spec.before, spec.after) {
            (Some(names), None, None, None) if spec.anchor.is_none() => Some(Self::Without(names)),
            (None, Some(names), None, None) if spec.anchor.is_none() => Some(Self::Extend(names)),
            (None, None, Some(variants), None) => Some(Self::Before {
                variants,
                anchor: spec.anchor,
            }),
            (None, None, None, Some(variants)) => Some(Self::After {
                variants,
                anchor: spec.anchor,
            }),
            _ => None,
        }
    }

    /// Applies the edit to `current`, returning the new list.
    ///
    /// Inserted names already present in the list are skipped. An anchor
    /// that is not in the list behaves like no anchor.
    pub fn apply(&self, current: &VariantList) -> VariantList {
        let mut list = current.clone();
        match self {
            Self::Without(names) => list.remove_all(names),
            Self::Extend(names) => {
                for name in names {
                    list.push(name.as_str());
                }
            }
            Self::Before { variants, anchor } => {
                let at = anchor
                    .as_deref()
                    .and_then(|a| list.position(a))
                    .unwrap_or(0);
                list.insert_at(at, variants);
            }
            Self::After { variants, anchor } => {
                let at = anchor
                    .as_deref()
                    .and_then(|a| list.position(a))
                    .map_or(list.len(), |i| i + 1);
                list.insert_at(at, variants);
            }
        }
        list
    }
}
