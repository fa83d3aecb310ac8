//! Short-lived in-memory cache of normalized weather, keyed by coordinate.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::types::WeatherResult;

/// Default time-to-live for cached lookups.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: WeatherResult,
    stored_at: Instant,
}

/// Thread-safe TTL cache with expiry on read.
///
/// Every operation takes the lock for a single map access; there is no
/// background sweep.
#[derive(Debug)]
pub struct WeatherCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored value if it is younger than the TTL. An expired
    /// entry is evicted.
    pub fn get(&self, key: &str) -> Option<WeatherResult> {
        let mut entries = self.entries.lock();
        let fresh = entries.get(key)?.stored_at.elapsed() < self.ttl;
        if fresh {
            entries.get(key).map(|entry| entry.value.clone())
        } else {
            entries.remove(key);
            tracing::debug!("Evicted expired weather cache entry {}", key);
            None
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, value: WeatherResult) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
        };
        self.entries.lock().insert(key.into(), entry);
    }

    /// Number of entries currently held, including ones not yet found expired.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}
