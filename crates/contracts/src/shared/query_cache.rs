//! Keyed cache for list and detail fetches.
//!
//! Entries are grouped by entity so a successful mutation can invalidate
//! every cached view of that entity at once. Each entity carries a
//! generation counter; fetches started before an invalidation are stale
//! and their results are discarded on completion.

use std::collections::{HashMap, HashSet};

/// How many times a failed fetch is retried before the error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy { attempts: 0 };
    pub const ONCE: RetryPolicy = RetryPolicy { attempts: 1 };

    pub fn should_retry(&self, failed_attempts: u32) -> bool {
        failed_attempts <= self.attempts
    }
}

/// Handle for an in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub entity: String,
    pub key: String,
    generation: u64,
}

#[derive(Debug)]
struct EntityBucket<V> {
    generation: u64,
    entries: HashMap<String, V>,
    in_flight: HashSet<String>,
}

impl<V> Default for EntityBucket<V> {
    fn default() -> Self {
        Self {
            generation: 0,
            entries: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }
}

#[derive(Debug)]
pub struct QueryCache<V> {
    buckets: HashMap<String, EntityBucket<V>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: &str, key: &str) -> Option<V> {
        self.buckets
            .get(entity)
            .and_then(|bucket| bucket.entries.get(key))
            .cloned()
    }

    pub fn is_in_flight(&self, entity: &str, key: &str) -> bool {
        self.buckets
            .get(entity)
            .is_some_and(|bucket| bucket.in_flight.contains(key))
    }

    /// Register a fetch. Returns `None` when the key is already cached or
    /// another fetch for it is running.
    pub fn begin(&mut self, entity: &str, key: &str) -> Option<FetchTicket> {
        let bucket = self.buckets.entry(entity.to_string()).or_default();
        if bucket.entries.contains_key(key) || bucket.in_flight.contains(key) {
            return None;
        }
        bucket.in_flight.insert(key.to_string());
        Some(FetchTicket {
            entity: entity.to_string(),
            key: key.to_string(),
            generation: bucket.generation,
        })
    }

    /// Like [`begin`](Self::begin) but ignores a cached value; used by an
    /// explicit refetch.
    pub fn begin_refetch(&mut self, entity: &str, key: &str) -> Option<FetchTicket> {
        let bucket = self.buckets.entry(entity.to_string()).or_default();
        if bucket.in_flight.contains(key) {
            return None;
        }
        bucket.entries.remove(key);
        bucket.in_flight.insert(key.to_string());
        Some(FetchTicket {
            entity: entity.to_string(),
            key: key.to_string(),
            generation: bucket.generation,
        })
    }

    /// Store a result. Returns `false` when the ticket predates an
    /// invalidation; the value is dropped in that case.
    pub fn complete(&mut self, ticket: &FetchTicket, value: V) -> bool {
        let Some(bucket) = self.buckets.get_mut(&ticket.entity) else {
            return false;
        };
        if bucket.generation != ticket.generation {
            return false;
        }
        bucket.in_flight.remove(&ticket.key);
        bucket.entries.insert(ticket.key.clone(), value);
        true
    }

    pub fn fail(&mut self, ticket: &FetchTicket) {
        if let Some(bucket) = self.buckets.get_mut(&ticket.entity) {
            if bucket.generation == ticket.generation {
                bucket.in_flight.remove(&ticket.key);
            }
        }
    }

    /// Drop every entry of an entity and mark running fetches stale.
    pub fn invalidate(&mut self, entity: &str) -> u64 {
        let bucket = self.buckets.entry(entity.to_string()).or_default();
        bucket.generation += 1;
        bucket.entries.clear();
        bucket.in_flight.clear();
        bucket.generation
    }

    pub fn generation(&self, entity: &str) -> u64 {
        self.buckets.get(entity).map_or(0, |b| b.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_dedupes_in_flight() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let ticket = cache.begin("categories", "page=1").expect("first fetch");
        assert!(cache.begin("categories", "page=1").is_none());
        assert!(cache.is_in_flight("categories", "page=1"));

        assert!(cache.complete(&ticket, 7));
        assert_eq!(cache.get("categories", "page=1"), Some(7));
        assert!(cache.begin("categories", "page=1").is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let ticket = cache.begin("units", "k").expect("ticket");
        cache.invalidate("units");
        assert!(!cache.complete(&ticket, 1));
        assert_eq!(cache.get("units", "k"), None);
        assert!(cache.begin("units", "k").is_some());
    }

    #[test]
    fn test_invalidate_is_scoped_to_entity() {
        let mut cache: QueryCache<&str> = QueryCache::new();
        let a = cache.begin("products", "k").expect("a");
        let b = cache.begin("units", "k").expect("b");
        cache.complete(&a, "p");
        cache.complete(&b, "u");
        cache.invalidate("products");
        assert_eq!(cache.get("products", "k"), None);
        assert_eq!(cache.get("units", "k"), Some("u"));
    }

    #[test]
    fn test_failure_releases_key() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let ticket = cache.begin("units", "k").expect("ticket");
        cache.fail(&ticket);
        assert!(cache.begin("units", "k").is_some());
    }

    #[test]
    fn test_refetch_replaces_cached_value() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let t = cache.begin("units", "k").expect("ticket");
        cache.complete(&t, 1);
        let t = cache.begin_refetch("units", "k").expect("refetch");
        assert_eq!(cache.get("units", "k"), None);
        cache.complete(&t, 2);
        assert_eq!(cache.get("units", "k"), Some(2));
    }

    #[test]
    fn test_retry_once() {
        assert!(RetryPolicy::ONCE.should_retry(1));
        assert!(!RetryPolicy::ONCE.should_retry(2));
        assert!(!RetryPolicy::NONE.should_retry(1));
    }
}
