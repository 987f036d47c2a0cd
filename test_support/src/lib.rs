//! Test-support crate for Kotoba.
//!
//! This crate provides test-only capability doubles:
//! - a recording logger that captures warnings and errors
//! - an in-memory remote template store and a failing variant
//!
//! All items are intended for use in tests within this workspace; avoid
//! using them in production code.

pub mod logger;
pub mod remote;

/// Re-export of [`logger::RecordingLogger`] for concise call sites.
pub use logger::RecordingLogger;

/// Re-exports of the remote store doubles.
pub use remote::{FailingRemote, StubRemote};
