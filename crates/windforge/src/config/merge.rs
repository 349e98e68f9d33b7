//! Structural config merging.

use serde_json::{Map, Value};

use super::modifier::VariantModifier;
use crate::variants::VariantList;

/// Deep-merges `overlay` on top of `base`, returning a new value.
///
/// Mappings merge key by key; any other value in `overlay` (scalars,
/// arrays, `null`) replaces the base value wholesale. Neither input is
/// modified.
pub fn merge_value(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                let next = match base_map.get(key) {
                    Some(existing) => merge_value(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merges one config layer onto the accumulated config.
///
/// Before the plain deep merge, every `variants.<key>` entry of the layer
/// that is a [`VariantModifier`] is replaced by the list obtained from
/// applying it to the accumulated list for that key.
pub(crate) fn merge_layer(acc: &Value, layer: &Value) -> Value {
    match resolve_variant_modifiers(acc, layer) {
        Some(rewritten) => merge_value(acc, &rewritten),
        None => merge_value(acc, layer),
    }
}

fn resolve_variant_modifiers(acc: &Value, layer: &Value) -> Option<Value> {
    let layer_variants = layer.get("variants")?.as_object()?;
    if !layer_variants.values().any(|v| VariantModifier::from_value(v).is_some()) {
        return None;
    }

    let inherited = acc.get("variants");
    let mut rewritten = Map::with_capacity(layer_variants.len());
    for (key, value) in layer_variants {
        let resolved = match VariantModifier::from_value(value) {
            Some(modifier) => {
                let current = inherited_list(inherited, key);
                modifier.apply(&current).to_value()
            }
            None => value.clone(),
        };
        rewritten.insert(key.clone(), resolved);
    }

    let mut layer = layer.clone();
    if let Some(map) = layer.as_object_mut() {
        map.insert("variants".to_string(), Value::Object(rewritten));
    }
    Some(layer)
}

fn inherited_list(inherited: Option<&Value>, key: &str) -> VariantList {
    match inherited {
        // A global flat list applies to every key.
        Some(list @ Value::Array(_)) => VariantList::from_value(list),
        Some(Value::Object(map)) => map.get(key).map(VariantList::from_value).unwrap_or_default(),
        _ => VariantList::new(),
    }
}
