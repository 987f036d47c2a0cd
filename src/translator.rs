//! Public translation façade.
//!
//! A `Translator` pairs an engine with a loader and runs the full request
//! pipeline: clone the engine for the request, collect the tree's
//! translation keys, load them in one batch, then resolve the tree
//! against the populated catalog.

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::engine::{Engine, EngineError};
use crate::loader::Loader;
use crate::walker;

/// Engine/loader pair exposing the translation entry points.
pub struct Translator {
    engine: Engine,
    loader: Loader,
}

impl Translator {
    /// Pair an engine with a loader.
    #[must_use]
    pub fn new(engine: Engine, loader: Loader) -> Self {
        Self { engine, loader }
    }

    /// Shared engine backing every request.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access to the shared engine, for locale, timezone, and
    /// logger changes between requests.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Translate a tree under an optional request locale and timezone.
    ///
    /// The output is structurally identical to the input except at valid
    /// translation nodes; the input is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTimezone`] for an unknown zone name.
    /// Resolution faults never error: they surface in-tree per the
    /// failure policy.
    pub fn translate(
        &self,
        value: &Value,
        locale: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<Value, EngineError> {
        let engine = self.engine.clone_for_request(locale, timezone)?;
        let keys = walker::collect_keys(value);
        if !keys.is_empty() {
            self.loader.load(&engine, &keys);
        }
        Ok(walker::resolve_tree(value, &engine))
    }

    /// Translate any serializable value.
    ///
    /// The value is canonicalized through its `Serialize` implementation
    /// before walking, which is how opaque types expose their tree form.
    ///
    /// # Errors
    ///
    /// Returns serialization failures and unknown-timezone faults.
    pub fn translate_serialize<T: Serialize>(
        &self,
        value: &T,
        locale: Option<&str>,
        timezone: Option<&str>,
    ) -> anyhow::Result<Value> {
        let canonical = serde_json::to_value(value).context("canonicalize value")?;
        self.translate(&canonical, locale, timezone)
            .context("translate canonicalized value")
    }

    /// Forward teardown to the loader's remote capability.
    pub fn disconnect(&self) {
        self.loader.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::loader::LoaderConfig;
    use serde_json::json;

    fn translator() -> Translator {
        let engine = Engine::init(EngineConfig::default());
        engine.add_translations("en", &json!({"howdy": "Howdy"}));
        let loader = Loader::init(LoaderConfig::default()).expect("loader");
        Translator::new(engine, loader)
    }

    #[test]
    fn translates_a_node_to_a_string() {
        let out = translator()
            .translate(&json!({"@translate": {"key": "howdy"}}), Some("en"), None)
            .expect("translate");
        assert_eq!(out, json!("Howdy"));
    }

    #[test]
    fn translation_is_idempotent_on_translated_output() {
        let subject = translator();
        let value = json!({"nested": {"object": {"@translate": {"key": "howdy"}}}});
        let once = subject.translate(&value, Some("en"), None).expect("first");
        let twice = subject.translate(&once, Some("en"), None).expect("second");
        assert_eq!(once, twice);
    }

    #[test]
    fn serializable_values_canonicalize_before_walking() {
        #[derive(serde::Serialize)]
        struct Payload {
            greeting: Value,
            count: u32,
        }
        let payload = Payload {
            greeting: json!({"@translate": {"key": "howdy"}}),
            count: 2,
        };
        let out = translator()
            .translate_serialize(&payload, Some("en"), None)
            .expect("translate");
        assert_eq!(out, json!({"greeting": "Howdy", "count": 2}));
    }

    #[test]
    fn unknown_request_timezone_is_an_api_error() {
        let err = translator()
            .translate(&json!({}), Some("en"), Some("Nowhere/Here"))
            .expect_err("must reject");
        assert_eq!(err, EngineError::UnknownTimezone("Nowhere/Here".to_owned()));
    }
}
