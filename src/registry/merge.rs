//! Deep merge of declarative style documents.

use serde_json::Value;

/// Merges `overlay` into `base`.
///
/// Objects merge key by key, recursively. Every other value (including
/// arrays) in `overlay` replaces the value in `base`.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge() {
        let mut base = json!({"palette": {"primary": "#111111", "accent": "#222222"}, "name": "Base"});
        deep_merge(&mut base, json!({"palette": {"accent": "#333333"}, "name": "Clone"}));
        assert_eq!(
            base,
            json!({"palette": {"primary": "#111111", "accent": "#333333"}, "name": "Clone"})
        );
    }

    #[test]
    fn test_arrays_are_replaced() {
        let mut base = json!({"gallery": ["a", "b", "c"]});
        deep_merge(&mut base, json!({"gallery": ["z"]}));
        assert_eq!(base, json!({"gallery": ["z"]}));
    }

    #[test]
    fn test_new_keys_are_added() {
        let mut base = json!({"a": 1});
        deep_merge(&mut base, json!({"b": {"c": 2}}));
        assert_eq!(base, json!({"a": 1, "b": {"c": 2}}));
    }
}
