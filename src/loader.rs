//! Cache-fronted bridge to a remote template store.
//!
//! The remote store is an opaque capability exposing per-key hash reads
//! (field = locale tag, value = template). The loader reads through a
//! bounded cache, batches the remaining keys into one remote round trip,
//! writes fetched templates back to the cache, and merges everything it
//! assembled into the engine's catalog. Remote faults degrade to the
//! cache-derived result with a warning; they are never user-visible.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::cache::{CacheConfig, TemplateCache};
use crate::engine::Engine;
use crate::logging::{self, Logger};

/// Remote key/value capability.
///
/// Implementations own connection lifecycle, pooling, retries, and
/// timeouts; the loader only issues reads.
pub trait RemoteStore: Send + Sync {
    /// Fetch the named fields of `key`. The result aligns with `fields`:
    /// absent fields yield `None` at their position.
    ///
    /// # Errors
    ///
    /// Any transport or protocol fault; the loader degrades to cached
    /// data.
    fn hash_fields_get(&self, key: &str, fields: &[String]) -> anyhow::Result<Vec<Option<String>>>;

    /// Fetch the named fields of several keys in one round trip, one row
    /// per key in order. Implementations backed by a pipelined protocol
    /// should override this; the default loops over
    /// [`RemoteStore::hash_fields_get`].
    ///
    /// # Errors
    ///
    /// Any transport or protocol fault; the loader degrades to cached
    /// data.
    fn hash_fields_get_batch(
        &self,
        keys: &[String],
        fields: &[String],
    ) -> anyhow::Result<Vec<Vec<Option<String>>>> {
        keys.iter()
            .map(|key| self.hash_fields_get(key, fields))
            .collect()
    }

    /// Release any held connection. Called by [`Loader::disconnect`].
    fn disconnect(&self) {}
}

/// Faults raised while validating loader configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The cache TTL was zero.
    #[error("cache max_age must be greater than zero")]
    ZeroMaxAge,
}

/// Construction-time loader settings.
#[derive(Default)]
pub struct LoaderConfig {
    /// Remote capability; `None` means cache-only operation.
    pub remote: Option<Arc<dyn RemoteStore>>,
    /// Cache sizing; defaults to 500 entries and a one-hour TTL.
    pub cache: CacheConfig,
    /// Logger capability; defaults to the `tracing` logger.
    pub logger: Option<Arc<dyn Logger>>,
}

/// Batched, cache-fronted template loader.
pub struct Loader {
    remote: Option<Arc<dyn RemoteStore>>,
    cache: TemplateCache,
    logger: Arc<dyn Logger>,
}

impl Loader {
    /// Build a loader from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid cache settings.
    pub fn init(config: LoaderConfig) -> Result<Self, ConfigError> {
        if config.cache.max_age.is_zero() {
            return Err(ConfigError::ZeroMaxAge);
        }
        Ok(Self {
            remote: config.remote,
            cache: TemplateCache::new(&config.cache),
            logger: config.logger.unwrap_or_else(logging::default_logger),
        })
    }

    /// Forward teardown to the remote capability, when one is attached.
    pub fn disconnect(&self) {
        if let Some(remote) = &self.remote {
            remote.disconnect();
        }
    }

    /// Load templates for `keys` across the engine's consulted locales.
    ///
    /// Cache hits never touch the remote. Everything assembled, cached or
    /// fetched, is merged into the engine's catalog before returning so
    /// subsequent node resolution sees it.
    pub fn load(
        &self,
        engine: &Engine,
        keys: &[String],
    ) -> HashMap<String, HashMap<String, String>> {
        let locales = engine.locales();
        let mut assembled: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut unknown: Vec<String> = Vec::new();

        for key in dedup(keys) {
            match self.cache.get(key, &locales) {
                Some(cached) if !cached.is_empty() => {
                    for (locale, template) in cached {
                        assembled
                            .entry(locale)
                            .or_default()
                            .insert(key.to_owned(), template);
                    }
                }
                _ => unknown.push(key.to_owned()),
            }
        }

        if let Some(remote) = &self.remote
            && !unknown.is_empty()
        {
            match remote.hash_fields_get_batch(&unknown, &locales) {
                Ok(rows) => {
                    for (key, row) in unknown.iter().zip(rows) {
                        let fetched: HashMap<String, String> = locales
                            .iter()
                            .zip(row)
                            .filter_map(|(locale, slot)| {
                                slot.filter(|template| !template.is_empty())
                                    .map(|template| (locale.clone(), template))
                            })
                            .collect();
                        if fetched.is_empty() {
                            continue;
                        }
                        self.cache.set(key, fetched.clone());
                        for (locale, template) in fetched {
                            assembled
                                .entry(locale)
                                .or_default()
                                .insert(key.clone(), template);
                        }
                    }
                }
                Err(err) => {
                    self.logger
                        .warn(&format!("remote template load failed: {err:#}"));
                }
            }
        }

        for (locale, templates) in &assembled {
            let tree: Map<String, Value> = templates
                .iter()
                .map(|(key, template)| (key.clone(), Value::String(template.clone())))
                .collect();
            engine.add_translations(locale, &Value::Object(tree));
        }
        assembled
    }
}

fn dedup(keys: &[String]) -> Vec<&String> {
    let mut seen: Vec<&String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}
