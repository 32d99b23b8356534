//! Progress reporting for dataset loading.
//!
//! The loader reports how many records it has normalized through
//! [`ProgressCallback`] so that the rendering strategy (an `indicatif`
//! bar in the CLI, nothing in tests) stays outside this crate.

use std::sync::Arc;

/// Receives progress updates while a dataset is being loaded.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of records, once known.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` records.
    fn inc(&self, delta: u64);

    /// Mark loading as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
