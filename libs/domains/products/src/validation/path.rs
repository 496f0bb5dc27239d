//! Dotted-path lookup over a JSON tree.
//!
//! `data.attributes.price` walks object keys; numeric segments such as the
//! `0` in `items.0.name` index into arrays.

use serde_json::Value;

/// Resolve `path` inside `root`.
///
/// Returns `None` when any segment is missing or when an intermediate value
/// is neither an object nor an array.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
