use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{MetricsReset, ReadMetricsRecorder, WriteMetricsRecorder};

#[derive(Debug, Default)]
pub struct WriteOrderMetrics {
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evicted_entries: u64,
}

impl WriteOrderMetrics {
    pub fn get_calls(&self) -> u64 {
        self.get_hits.get() + self.get_misses.get()
    }
}

impl WriteMetricsRecorder for WriteOrderMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
}

impl ReadMetricsRecorder for WriteOrderMetrics {
    fn record_get_hit(&self) {
        self.get_hits.incr();
    }

    fn record_get_miss(&self) {
        self.get_misses.incr();
    }
}

impl MetricsReset for WriteOrderMetrics {
    fn reset_metrics(&mut self) {
        self.get_hits.reset();
        self.get_misses.reset();
        self.insert_calls = 0;
        self.insert_new = 0;
        self.insert_updates = 0;
        self.evicted_entries = 0;
    }
}
