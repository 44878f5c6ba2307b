//! Optional instrumentation for the write-order cache (`metrics` feature).
//!
//! Recording, snapshotting and export are kept apart:
//!
//! ```text
//!   WriteOrderCore ──record_*──► WriteOrderMetrics
//!                                      │ snapshot()
//!                                      ▼
//!                          WriteOrderMetricsSnapshot ──export()──► PrometheusTextExporter
//! ```

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
