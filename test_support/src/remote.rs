//! Remote store doubles.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use kotoba::loader::RemoteStore;

/// In-memory remote template store.
///
/// Tracks how many keys were fetched so tests can assert that cache hits
/// never reach the remote.
#[derive(Debug, Default)]
pub struct StubRemote {
    entries: HashMap<String, HashMap<String, String>>,
    fetched_keys: Mutex<Vec<String>>,
    disconnects: Mutex<usize>,
}

impl StubRemote {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one `(key, locale) -> template` entry.
    #[must_use]
    pub fn with_template(mut self, key: &str, locale: &str, template: &str) -> Self {
        self.entries
            .entry(key.to_owned())
            .or_default()
            .insert(locale.to_owned(), template.to_owned());
        self
    }

    /// Keys fetched so far, in request order.
    #[must_use]
    pub fn fetched_keys(&self) -> Vec<String> {
        self.fetched_keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of [`RemoteStore::disconnect`] calls observed.
    #[must_use]
    pub fn disconnect_count(&self) -> usize {
        *self
            .disconnects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RemoteStore for StubRemote {
    fn hash_fields_get(&self, key: &str, fields: &[String]) -> anyhow::Result<Vec<Option<String>>> {
        self.fetched_keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(key.to_owned());
        let entry = self.entries.get(key);
        Ok(fields
            .iter()
            .map(|field| entry.and_then(|templates| templates.get(field).cloned()))
            .collect())
    }

    fn disconnect(&self) {
        *self
            .disconnects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
    }
}

/// Remote store whose every read fails, as an unreachable endpoint does.
#[derive(Debug, Default)]
pub struct FailingRemote;

impl RemoteStore for FailingRemote {
    fn hash_fields_get(
        &self,
        _key: &str,
        _fields: &[String],
    ) -> anyhow::Result<Vec<Option<String>>> {
        Err(anyhow!("connection refused"))
    }
}
