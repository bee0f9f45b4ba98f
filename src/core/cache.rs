//! Bounded FIFO cache for finished recommendations.
//!
//! Keys are a digest of bounded prefixes of the query and response, so two
//! requests that agree on both prefixes share an entry. That collision is an
//! accepted approximation. Reads never refresh an entry: eviction order is
//! strictly insertion order.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::utils::safe_truncate;

pub struct RecommendationCache<T> {
    entries: Mutex<LruCache<String, T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl<T> RecommendationCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        // `peek` leaves the recency order untouched, which keeps eviction FIFO.
        let entries = self.entries.lock();
        match entries.peek(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }


    /// Inserts a new entry, evicting the oldest one when full.
    ///
    /// An existing entry is never replaced; the first value stored for a key wins.
    pub fn put(&self, key: String, value: T) -> Option<(String, T)> {
        let mut entries = self.entries.lock();
        if entries.contains(&key) {
            return None;
        }
        let evicted = entries.push(key, value);
        if let Some((old_key, _)) = &evicted {
            debug!("Recommendation cache full, evicted {}", old_key);
        }
        evicted
    }

    pub fn evict_oldest(&self) -> Option<(String, T)> {
        self.entries.lock().pop_lru()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn make_key(query: &str, response: &str, prefix_chars: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(safe_truncate(query, prefix_chars).as_bytes());
        hasher.update([0x1f]);
        hasher.update(safe_truncate(response, prefix_chars).as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fifo_eviction_after_capacity() {
        let cache = RecommendationCache::new(50);
        for i in 0..51 {
            cache.put(format!("key-{i}"), i);
        }
        assert_eq!(cache.len(), 50);
        assert!(!cache.contains("key-0"));
        assert!(cache.contains("key-1"));
        assert!(cache.contains("key-50"));
    }

    #[test]
    fn test_reads_do_not_refresh_entries() {
        let cache = RecommendationCache::new(2);
        cache.put("first".to_string(), 1);
        cache.put("second".to_string(), 2);
        assert_eq!(cache.get("first"), Some(1));

        let evicted = cache.put("third".to_string(), 3);
        assert_eq!(evicted, Some(("first".to_string(), 1)));
        assert_eq!(cache.get("first"), None);
        assert_eq!(cache.get("second"), Some(2));
    }

    #[test]
    fn test_existing_entry_is_not_replaced() {
        let cache = RecommendationCache::new(4);
        cache.put("k".to_string(), 1);
        assert!(cache.put("k".to_string(), 2).is_none());
        assert_eq!(cache.get("k"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evict_on_empty_and_single_entry() {
        let cache: RecommendationCache<u32> = RecommendationCache::new(3);
        assert!(cache.evict_oldest().is_none());

        cache.put("only".to_string(), 7);
        assert_eq!(cache.evict_oldest(), Some(("only".to_string(), 7)));
        assert!(cache.is_empty());
        assert!(cache.evict_oldest().is_none());
    }

    #[test]
    fn test_capacity_one() {
        let cache = RecommendationCache::new(1);
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: RecommendationCache<u8> = RecommendationCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_make_key_uses_prefixes() {
        let long_a = format!("{}{}", "x".repeat(200), "tail a");
        let long_b = format!("{}{}", "x".repeat(200), "tail b");
        let k1 = RecommendationCache::<u8>::make_key("q", &long_a, 200);
        let k2 = RecommendationCache::<u8>::make_key("q", &long_b, 200);
        assert_eq!(k1, k2);

        let k3 = RecommendationCache::<u8>::make_key("q2", &long_a, 200);
        assert_ne!(k1, k3);

        let swapped_a = RecommendationCache::<u8>::make_key("ab", "c", 200);
        let swapped_b = RecommendationCache::<u8>::make_key("a", "bc", 200);
        assert_ne!(swapped_a, swapped_b);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let cache = RecommendationCache::new(4);
        cache.put("k".to_string(), 1);
        cache.get("k");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_concurrent_inserts_stay_bounded() {
        let cache = Arc::new(RecommendationCache::new(50));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.put(format!("{t}-{i}"), i);
                        cache.get(&format!("{t}-{}", i / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 50);
    }
}
