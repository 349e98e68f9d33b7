//! Built-in configuration defaults.

use serde_json::{json, Value};

/// Returns the lowest-precedence config layer.
///
/// Variant defaults cover the built-in plugins; anything else a plugin
/// reads must come from its own config fragment or from the user.
pub fn default_config() -> Value {
    json!({
        "prefix": "",
        "important": false,
        "separator": ":",
        "theme": {
            "screens": {
                "sm": "640px",
                "md": "768px",
                "lg": "1024px",
                "xl": "1280px",
                "2xl": "1536px"
            },
            "opacity": {
                "0": "0",
                "5": "0.05",
                "10": "0.1",
                "20": "0.2",
                "25": "0.25",
                "30": "0.3",
                "40": "0.4",
                "50": "0.5",
                "60": "0.6",
                "70": "0.7",
                "75": "0.75",
                "80": "0.8",
                "90": "0.9",
                "95": "0.95",
                "100": "1"
            }
        },
        "variants": {
            "justifyItems": ["responsive"],
            "placeSelf": ["responsive"],
            "opacity": ["responsive", "group-hover", "focus-within", "hover", "focus"]
        },
        "corePlugins": {}
    })
}
