//! Configuration merging engine.
//!
//! Combines the `common` configuration with a registry override. The merge
//! is structural: nested mappings are merged key by key, everything else is
//! replaced by the override.
//!
//! # Precedence
//!
//! 1. **Common** - shared base configuration (lowest precedence)
//! 2. **Registry** - per-registry override (highest precedence)
//!
//! # Examples
//!
//! ```rust
//! use config_manager::deep_merge;
//! use serde_yaml::Value;
//!
//! let base: Value = serde_yaml::from_str("a: {x: 1, y: 2}").unwrap();
//! let overlay: Value = serde_yaml::from_str("a: {y: 3, z: 4}").unwrap();
//!
//! let merged = deep_merge(&base, &overlay);
//! let expected: Value = serde_yaml::from_str("a: {x: 1, y: 3, z: 4}").unwrap();
//! assert_eq!(merged, expected);
//! ```

use serde_yaml::{Mapping, Value};

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

/// Merges `overlay` on top of `base` and returns the result as a new value.
///
/// When both sides are mappings the result starts with the entries of
/// `base` in their original order. Each key of `overlay` is then visited in
/// its own order: keys already present are merged recursively in place,
/// new keys are appended. For any other combination of kinds (sequences,
/// scalars, tagged values, or mismatched kinds) `overlay` replaces `base`
/// outright. Sequences are never concatenated.
///
/// Neither input is modified.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            Value::Mapping(merge_mappings(base_map, overlay_map))
        }
        _ => overlay.clone(),
    }
}

/// Mapping-level form of [`deep_merge`].
pub fn merge_mappings(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut merged = base.clone();

    for (key, value) in overlay {
        let next = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        // Existing keys keep their position; new keys go to the end.
        merged.insert(key.clone(), next);
    }

    merged
}
