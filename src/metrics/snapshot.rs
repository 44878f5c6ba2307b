#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteOrderMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    pub evicted_entries: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl WriteOrderMetricsSnapshot {
    /// Fraction of lookups that hit, or `None` before the first lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        if self.get_calls == 0 {
            None
        } else {
            Some(self.get_hits as f64 / self.get_calls as f64)
        }
    }
}
