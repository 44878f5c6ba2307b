//! Read-through usage: consult the cache first, fall back to a slow store on
//! a miss, then populate the cache.
//!
//! Run with: `cargo run --example read_through`

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use lrwcache::builder::CacheBuilder;
use lrwcache::error::CacheMiss;
use lrwcache::policy::write_order::WriteOrderCache;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Stand-in for a database or remote service.
struct SlowStore {
    rows: HashMap<String, String>,
}

impl SlowStore {
    fn fetch(&self, key: &str) -> Option<String> {
        thread::sleep(Duration::from_millis(20));
        self.rows.get(key).cloned()
    }
}

struct ReadThrough {
    cache: WriteOrderCache<String, String>,
    store: SlowStore,
}

impl ReadThrough {
    fn get(&self, key: &str) -> Option<String> {
        match self.cache.get(key) {
            Ok(value) => {
                info!(key, "cache hit");
                Some(value)
            },
            Err(CacheMiss) => {
                info!(key, "cache miss, fetching from store");
                let value = self.store.fetch(key)?;
                self.cache.put(key.to_string(), value.clone());
                Some(value)
            },
        }
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let rows = (0..10)
        .map(|i| (format!("user:{}", i), format!("User #{}", i)))
        .collect();
    let reader = ReadThrough {
        cache: CacheBuilder::new(3).build(),
        store: SlowStore { rows },
    };

    for key in ["user:1", "user:2", "user:1", "user:3", "user:4", "user:1"] {
        println!("{} -> {:?}", key, reader.get(key));
    }
    println!("cached keys, newest write first: {:?}", reader.cache.keys());
}

// Expected output (log lines omitted):
// user:1 -> Some("User #1")
// user:2 -> Some("User #2")
// user:1 -> Some("User #1")
// user:3 -> Some("User #3")
// user:4 -> Some("User #4")
// user:1 -> Some("User #1")
// cached keys, newest write first: ["user:1", "user:4", "user:3"]
//
// Explanation: capacity=3. The third lookup of user:1 hits but does not
// refresh it; writing user:4 evicts user:1 (oldest write), so the last
// lookup misses and writes it again, evicting user:2.
