use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::WriteOrderMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; exporting never fails the caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_sample(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<WriteOrderMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &WriteOrderMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_new_total", snapshot.insert_new),
            ("insert_updates_total", snapshot.insert_updates),
            ("evicted_entries_total", snapshot.evicted_entries),
        ];
        for (suffix, value) in counters {
            self.write_sample("counter", suffix, value);
        }
        self.write_sample("gauge", "cache_len", snapshot.cache_len as u64);
        self.write_sample("gauge", "capacity", snapshot.capacity as u64);
    }
}
