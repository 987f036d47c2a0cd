//! Bounded cache of remotely fetched templates.
//!
//! Entries map a template key to the locale/template pairs fetched for
//! it. The cache is bounded by entry count and per-entry age; expired
//! entries evict on read. Writes merge: new locales add, existing
//! locales overwrite, and the entry's age resets.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use lru::LruCache;

/// Default maximum entry count.
pub const DEFAULT_MAX_ENTRIES: usize = 500;
/// Default per-entry time to live.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Cache sizing knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of keys retained.
    pub max: NonZeroUsize,
    /// Per-entry time to live.
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max: NonZeroUsize::new(DEFAULT_MAX_ENTRIES).expect("default capacity is non-zero"),
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    templates: HashMap<String, String>,
}

/// LRU + TTL map from template key to `locale -> template`.
#[derive(Debug)]
pub struct TemplateCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    max_age: Duration,
}

impl TemplateCache {
    /// Build a cache from configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(config.max)),
            max_age: config.max_age,
        }
    }

    /// Fetch the cached locales for `key`, filtered to `locales`.
    ///
    /// An empty filter returns every known locale. Returns `None` when
    /// the key is absent or its entry has outlived the TTL.
    #[must_use]
    pub fn get(&self, key: &str, locales: &[String]) -> Option<HashMap<String, String>> {
        let mut guard = self.lock_entries();
        let entry = guard.get(key)?;
        if entry.fetched_at.elapsed() > self.max_age {
            guard.pop(key);
            return None;
        }
        if locales.is_empty() {
            return Some(entry.templates.clone());
        }
        Some(
            entry
                .templates
                .iter()
                .filter(|(locale, _)| locales.contains(locale))
                .map(|(locale, template)| (locale.clone(), template.clone()))
                .collect(),
        )
    }

    /// Merge locale/template pairs into the entry for `key`.
    ///
    /// Resets the entry's recency and age.
    pub fn set(&self, key: &str, templates: HashMap<String, String>) {
        let mut guard = self.lock_entries();
        let merged = match guard.pop(key) {
            Some(mut entry) => {
                entry.templates.extend(templates);
                entry.templates
            }
            None => templates,
        };
        guard.put(
            key.to_owned(),
            CacheEntry {
                fetched_at: Instant::now(),
                templates: merged,
            },
        );
    }

    fn lock_entries(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
