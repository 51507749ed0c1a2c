//! Shared test utilities for the sodguard workspace.
//!
//! `xtask` needs [`normalize_nondeterministic`] at runtime when it refreshes golden
//! reports, so this cannot live behind `#[cfg(test)]` in `sodguard-types`.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

const ENVELOPE_KEYS: [&str; 5] = ["schema", "tool", "verdict", "violations", "data"];

/// Normalize non-deterministic report fields for golden-file comparison.
///
/// `tool.version` is replaced only when the root object is a report envelope, so a
/// violation that happens to carry a `tool` object is left alone. `started_at` and
/// `finished_at` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if let Some(slot) = map.get_mut(key) {
                    *slot = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps(val);
            }
        }
        _ => {}
    }
}

/// Render a JSON value the way golden files are stored: pretty-printed, trailing newline.
pub fn to_golden_string(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}
