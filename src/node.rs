//! Canonical translation node schema.
//!
//! A translation node is an object with exactly one top-level key
//! `@translate` whose payload names the template `key` and optionally a
//! `quantity`, a `placeholders` mapping, and an inline `fallback` template.
//! Anything else at either level renders the node unrecognized, and the
//! walker then treats it as an ordinary mapping.

use serde_json::{Map, Value};

/// Marker key identifying a translation node.
pub const TRANSLATE_KEY: &str = "@translate";

/// Parsed payload of a valid translation node.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    /// Dotted path or flat identifier of the template.
    pub key: String,
    /// Plural quantity; also bound as the `count` placeholder.
    pub quantity: Option<f64>,
    /// Named values substituted into the template.
    pub placeholders: Map<String, Value>,
    /// Template used verbatim when `key` is not found in any consulted
    /// locale.
    pub fallback: Option<String>,
}

/// Parse a value as a translation node.
///
/// Returns `None` unless the value is an object whose only key is
/// `@translate`, the payload is an object with a non-empty string `key`,
/// and every other payload member is one of `quantity` (number),
/// `placeholders` (mapping), or `fallback` (string).
#[must_use]
pub fn parse_node(value: &Value) -> Option<TranslateRequest> {
    let outer = value.as_object()?;
    if outer.len() != 1 {
        return None;
    }
    let payload = outer.get(TRANSLATE_KEY)?.as_object()?;
    let key = payload.get("key")?.as_str()?;
    if key.is_empty() {
        return None;
    }

    let mut request = TranslateRequest {
        key: key.to_owned(),
        quantity: None,
        placeholders: Map::new(),
        fallback: None,
    };
    for (name, member) in payload {
        match name.as_str() {
            "key" => {}
            "quantity" => request.quantity = Some(member.as_f64()?),
            "placeholders" => request.placeholders = member.as_object()?.clone(),
            "fallback" => request.fallback = Some(member.as_str()?.to_owned()),
            _ => return None,
        }
    }
    Some(request)
}

/// Whether a value has the canonical translation node shape.
#[must_use]
pub fn is_translation_node(value: &Value) -> bool {
    parse_node(value).is_some()
}

/// Optional members of a built translation node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOptions {
    /// Inline fallback template.
    pub fallback: Option<String>,
    /// Plural quantity.
    pub quantity: Option<f64>,
}

/// Build a canonical translation node for embedding into a tree.
///
/// # Examples
///
/// ```rust
/// use kotoba::node::{NodeOptions, build_translate_node, is_translation_node};
///
/// let node = build_translate_node("greeting.howdy", None, NodeOptions::default());
/// assert!(is_translation_node(&node));
/// ```
#[must_use]
pub fn build_translate_node(
    key: &str,
    placeholders: Option<Map<String, Value>>,
    options: NodeOptions,
) -> Value {
    let mut payload = Map::new();
    payload.insert("key".to_owned(), Value::String(key.to_owned()));
    if let Some(quantity) = options.quantity {
        payload.insert("quantity".to_owned(), Value::from(quantity));
    }
    if let Some(placeholders) = placeholders
        && !placeholders.is_empty()
    {
        payload.insert("placeholders".to_owned(), Value::Object(placeholders));
    }
    if let Some(fallback) = options.fallback {
        payload.insert("fallback".to_owned(), Value::String(fallback));
    }

    let mut outer = Map::new();
    outer.insert(TRANSLATE_KEY.to_owned(), Value::Object(payload));
    Value::Object(outer)
}
