//! Logger capability used for non-fatal fault reporting.
//!
//! Remote load failures and formatter errors never abort a translation;
//! they are reported through this capability instead. The default
//! implementation forwards to `tracing`, while tests substitute a recording
//! stub.

use std::sync::Arc;

/// Sink for warnings and errors raised during translation.
pub trait Logger: Send + Sync {
    /// Report a recoverable fault (for example a failed remote load).
    fn warn(&self, message: &str);
    /// Report a fault that degraded part of the output (for example a
    /// formatter failure).
    fn error(&self, message: &str);
}

/// Logger backed by the `tracing` ecosystem.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Shared handle to the default logger.
#[must_use]
pub fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}
