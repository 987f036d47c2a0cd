//! Recursive tree walker.
//!
//! The walk is two-phase: a collection pass gathers every translation key
//! in the tree so the loader can fetch them in one batch, then a
//! resolution pass produces a deep-cloned output with each valid node
//! replaced by its resolution. Resolved output is terminal and never
//! re-walked, and the input value is never mutated.

use serde_json::Value;

use crate::engine::Engine;
use crate::node;

/// Collect the template keys of every valid translation node, depth
/// first.
///
/// Invalid nodes are ordinary mappings and are walked into, so keys
/// nested under them are still collected.
#[must_use]
pub fn collect_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect_into(value, &mut keys);
    keys
}

fn collect_into(value: &Value, keys: &mut Vec<String>) {
    if let Some(request) = node::parse_node(value) {
        keys.push(request.key);
        return;
    }
    match value {
        Value::Object(map) => {
            for member in map.values() {
                collect_into(member, keys);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_into(item, keys);
            }
        }
        _ => {}
    }
}

/// Produce a deep-cloned copy of `value` with every valid translation
/// node resolved at its position.
///
/// Mappings keep their key order and sequences their element order;
/// scalars pass through unchanged.
#[must_use]
pub fn resolve_tree(value: &Value, engine: &Engine) -> Value {
    if let Some(request) = node::parse_node(value) {
        return engine.resolve_node(&request, value);
    }
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, member)| (key.clone(), resolve_tree(member, engine)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.iter().map(|item| resolve_tree(item, engine)).collect(),
        ),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use rstest::rstest;
    use serde_json::json;

    fn engine() -> Engine {
        let engine = Engine::init(EngineConfig::default());
        engine.add_translations("en", &json!({"howdy": "Howdy"}));
        engine
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!(42))]
    #[case(json!(13.5))]
    #[case(json!("plain text"))]
    #[case(json!([1, "two", null]))]
    #[case(json!({"a": {"b": [1, 2]}}))]
    fn values_without_nodes_pass_through(#[case] value: Value) {
        assert_eq!(resolve_tree(&value, &engine()), value);
        assert!(collect_keys(&value).is_empty());
    }

    #[test]
    fn nodes_resolve_in_place() {
        let value = json!({"nested": {"object": {"@translate": {"key": "howdy"}}}});
        let out = resolve_tree(&value, &engine());
        assert_eq!(out, json!({"nested": {"object": "Howdy"}}));
    }

    #[test]
    fn collection_is_depth_first_and_complete() {
        let value = json!({
            "a": {"@translate": {"key": "first"}},
            "b": [{"@translate": {"key": "second"}}],
            "c": {"deep": {"@translate": {"key": "third"}}},
        });
        assert_eq!(collect_keys(&value), ["first", "second", "third"]);
    }

    #[test]
    fn invalid_nodes_are_walked_into() {
        // The extra key invalidates the outer node; the inner one still
        // counts.
        let value = json!({
            "@translate": {"key": "outer"},
            "extra": {"@translate": {"key": "inner"}},
        });
        assert_eq!(collect_keys(&value), ["inner"]);

        let out = resolve_tree(&value, &engine());
        assert_eq!(out.get("@translate"), value.get("@translate"));
    }

    #[test]
    fn key_order_is_preserved() {
        let value = json!({"z": 1, "a": {"@translate": {"key": "howdy"}}, "m": 3});
        let out = resolve_tree(&value, &engine());
        let keys: Vec<&str> = out
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let value = json!({"greeting": {"@translate": {"key": "howdy"}}});
        let snapshot = value.clone();
        let _ = resolve_tree(&value, &engine());
        assert_eq!(value, snapshot);
    }

    #[test]
    fn resolution_output_is_terminal() {
        // A template that renders to node-shaped text stays text.
        let engine = Engine::init(EngineConfig::default());
        engine.add_translations(
            "en",
            &json!({"tricky": "{\"@translate\": {\"key\": \"howdy\"}}"}),
        );
        let value = json!({"@translate": {"key": "tricky"}});
        let out = resolve_tree(&value, &engine);
        assert_eq!(
            out,
            json!("{\"@translate\": {\"key\": \"howdy\"}}"),
        );
    }
}
