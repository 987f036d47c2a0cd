//! In-memory template catalog.
//!
//! Templates are stored per locale as nested trees; dotted keys
//! (`hello.world`) traverse the nesting, and a flat key containing dots is
//! matched before descent so both storage styles behave identically.
//! Readers are non-blocking and writers are serialized, matching the
//! many-reader/occasional-writer profile of translation traffic.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::plural;

/// Per-locale store of `(dotted key) -> template` trees.
#[derive(Debug, Default)]
pub struct Catalog {
    locales: RwLock<HashMap<String, Map<String, Value>>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merge a (possibly nested) mapping of templates for one locale.
    ///
    /// Nested objects merge recursively; scalar entries overwrite.
    /// Non-object values are ignored.
    pub fn add(&self, locale: &str, templates: &Value) {
        let Some(incoming) = templates.as_object() else {
            return;
        };
        let mut guard = self
            .locales
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tree = guard.entry(locale.to_owned()).or_default();
        deep_merge(tree, incoming);
    }

    /// Whether a template exists for `(locale, dotted key)`.
    #[must_use]
    pub fn exists(&self, locale: &str, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }

    /// Fetch the template for `(locale, dotted key)`.
    #[must_use]
    pub fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let guard = self
            .locales
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tree = guard.get(locale)?;
        resolve_path(tree, key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// Fetch a template with plural selection.
    ///
    /// With a quantity, sibling keys are tried most specific first: the
    /// named CLDR category (`<key>_few`), the category index (`<key>_3`),
    /// the legacy `<key>_plural`, and finally the bare key.
    #[must_use]
    pub fn lookup_with_plural(&self, locale: &str, key: &str, quantity: Option<f64>) -> Option<String> {
        if let Some(count) = quantity {
            for suffix in plural::suffixes(locale, count) {
                if let Some(template) = self.lookup(locale, &format!("{key}_{suffix}")) {
                    return Some(template);
                }
            }
        }
        self.lookup(locale, key)
    }
}

/// Walk a dotted path through a template tree.
///
/// An exact flat entry wins over descent, so `a.b` stored literally shadows
/// a nested `{a: {b: ...}}`.
fn resolve_path<'a>(tree: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(flat) = tree.get(key) {
        return Some(flat);
    }
    let (head, rest) = key.split_once('.')?;
    resolve_path(tree.get(head)?.as_object()?, rest)
}

fn deep_merge(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, value) in src {
        match (dst.get_mut(key), value.as_object()) {
            (Some(Value::Object(existing)), Some(incoming)) => deep_merge(existing, incoming),
            _ => {
                dst.insert(key.clone(), value.clone());
            }
        }
    }
}
