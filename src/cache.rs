//! Bounded, read-mostly caches for per-class results.
//!
//! A [`ClassCache`] is created once per configuration scope (typically one per
//! project) and handed by reference to the cached classify/validate calls.
//! Entries never expire on their own; the owner calls one of the `invalidate`
//! methods when the class universe or configuration changes.

use crate::classifier::Classification;
use crate::config::CacheConfig;
use crate::validation::ValidationResult;
use indexmap::IndexMap;
use parking_lot::RwLock;

/// One map behind a single reader/writer lock.
///
/// Overflow drops the oldest `evict_count` insertions, not the least recently
/// used ones.
#[derive(Debug)]
pub struct BoundedCache<V> {
    entries: RwLock<IndexMap<String, V>>,
    capacity: usize,
    evict_count: usize,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(capacity: usize, evict_count: usize) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            capacity: capacity.max(1),
            evict_count: evict_count.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let hit = self.entries.read().get(key).cloned();
        if hit.is_some() {
            log::trace!("cache hit for '{}'", key);
        }
        hit
    }

    pub fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.write();
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let evict = self.evict_count.min(entries.len());
            entries.drain(..evict);
            log::trace!("cache full ({} entries), evicted {} oldest", self.capacity, evict);
        }
        entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// The three per-class result maps
#[derive(Debug)]
pub struct ClassCache {
    /// Base utility → category and declaration
    pub classifications: BoundedCache<Classification>,
    /// Raw class → validation outcome
    pub validations: BoundedCache<ValidationResult>,
    /// Raw class → nearest known class names
    pub suggestions: BoundedCache<Vec<String>>,
}

impl ClassCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            classifications: BoundedCache::new(config.capacity, config.evict_count),
            validations: BoundedCache::new(config.capacity, config.evict_count),
            suggestions: BoundedCache::new(config.capacity, config.evict_count),
        }
    }

    /// Drop validation and suggestion results, e.g. after the class universe changed
    pub fn invalidate_validation(&self) {
        self.validations.clear();
        self.suggestions.clear();
    }

    /// Drop everything, e.g. after the theme configuration changed
    pub fn invalidate_all(&self) {
        self.classifications.clear();
        self.invalidate_validation();
        log::debug!("class cache cleared");
    }
}

impl Default for ClassCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_insert_and_get() {
        let cache: BoundedCache<u32> = BoundedCache::new(10, 2);
        cache.insert("p-4".to_string(), 1);
        assert_eq!(cache.get("p-4"), Some(1));
        assert_eq!(cache.get("p-2"), None);
    }

    #[test]
    fn test_evicts_oldest_batch_on_overflow() {
        let cache: BoundedCache<usize> = BoundedCache::new(5, 2);
        for i in 0..5 {
            cache.insert(format!("c{}", i), i);
        }
        assert_eq!(cache.len(), 5);

        cache.insert("c5".to_string(), 5);
        assert_eq!(cache.len(), 4);
        assert!(!cache.contains("c0"));
        assert!(!cache.contains("c1"));
        assert!(cache.contains("c2"));
        assert!(cache.contains("c5"));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache: BoundedCache<usize> = BoundedCache::new(2, 1);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("a".to_string(), 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(3));
    }

    #[test]
    fn test_invalidation() {
        let cache = ClassCache::default();
        cache.classifications.insert("flex".to_string(), Classification::other());
        cache.validations.insert("flex".to_string(), ValidationResult::Valid);
        cache.suggestions.insert("flx".to_string(), vec!["flex".to_string()]);

        cache.invalidate_validation();
        assert_eq!(cache.classifications.len(), 1);
        assert!(cache.validations.is_empty());
        assert!(cache.suggestions.is_empty());

        cache.invalidate_all();
        assert!(cache.classifications.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(BoundedCache::<usize>::new(100, 10));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        cache.insert(format!("{}-{}", t, i), i);
                        let _ = cache.get(&format!("{}-{}", t, i / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 100);
    }
}
