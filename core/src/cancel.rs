//! Cooperative cancellation for export pipelines.
//!
//! The exporter never blocks and never spawns threads; long loops poll a
//! [`CancellationToken`] at iteration boundaries and bail out with
//! `ExportError::Cancelled` once it fires. Clones share the same flag,
//! so a caller can hand a clone to the pipeline and cancel from outside.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag polled by export loops.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. All clones observe the request.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
