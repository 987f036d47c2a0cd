//! Kotoba core library.
//!
//! This library walks arbitrary JSON-like trees, resolves embedded
//! `{"@translate": {...}}` nodes against a locale catalog, and fronts a
//! remote template store with a bounded in-process cache.

pub mod cache;
pub mod catalog;
pub mod engine;
pub mod format;
pub mod interpolate;
pub mod loader;
pub mod locale;
pub mod logging;
pub mod node;
pub mod plural;
pub mod translator;
pub mod walker;

pub use engine::{Engine, EngineConfig};
pub use loader::{Loader, LoaderConfig, RemoteStore};
pub use node::build_translate_node;
pub use translator::Translator;
