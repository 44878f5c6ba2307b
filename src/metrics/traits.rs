//! # Metrics Traits
//!
//! Recorders only write counters, providers only read them, exporters only
//! publish snapshots.
//!
//! - [`WriteMetricsRecorder`]: called from `insert`, which already holds
//!   `&mut` access (exclusive lock in the concurrent wrapper).
//! - [`ReadMetricsRecorder`]: called from lookups through `&self`, possibly
//!   from many threads at once; implementations need interior mutability.

/// Counters recorded on the write path.
pub trait WriteMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
}

/// Counters recorded on the read path.
pub trait ReadMetricsRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
}

/// Produce a point-in-time snapshot.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
