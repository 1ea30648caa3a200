//! TTL-bounded map from `(contract, interface id)` to a supported flag.
//!
//! Expired entries are treated as absent. They are removed lazily when a
//! read finds them and in bulk by [`InterfaceCache::clean_expired`], which
//! the sweeper task calls on a fixed interval.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use atk_types::{Clock, EvmAddress, InterfaceId, Timestamp};

/// Ten minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

type CacheKey = (EvmAddress, InterfaceId);

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    supported: bool,
    stored_at: Timestamp,
}

/// Point-in-time counters for metrics export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

pub struct InterfaceCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl InterfaceCache {
    /// Entries are timestamped with whole seconds, so `ttl` is rounded up
    /// to the next second (1500 ms keeps entries for 2 s, never for 0).
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let ttl_secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_secs,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// The remembered answer, or `None` if unknown or expired.
    ///
    /// `None` means "probe again", never "unsupported".
    pub fn get(&self, address: &EvmAddress, interface_id: InterfaceId) -> Option<bool> {
        let key = (address.clone(), interface_id);
        let now = self.clock.now();
        let mut entries = self.lock();

        let found = match entries.get(&key) {
            Some(entry) if !entry.stored_at.is_older_than(self.ttl_secs, now) => {
                Some(entry.supported)
            }
            Some(_) => {
                entries.remove(&key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => None,
        };

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Store an answer, replacing any previous one.
    pub fn set(&self, address: &EvmAddress, interface_id: InterfaceId, supported: bool) {
        let entry = CacheEntry {
            supported,
            stored_at: self.clock.now(),
        };
        self.lock().insert((address.clone(), interface_id), entry);
    }

    /// Evict every expired entry. Returns the number removed.
    pub fn clean_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl_secs;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.stored_at.is_older_than(ttl, now));
        let removed = before - entries.len();
        self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    // Writers never leave the map half-updated, so a poisoned lock still
    // guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn advance(&self, secs: u64) {
            self.0.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            Timestamp::new(self.0.load(Ordering::SeqCst))
        }
    }

    fn setup() -> (Arc<ManualClock>, InterfaceCache) {
        let clock = Arc::new(ManualClock(AtomicU64::new(1_000)));
        let cache = InterfaceCache::new(DEFAULT_TTL, clock.clone());
        (clock, cache)
    }

    fn token() -> EvmAddress {
        EvmAddress::parse("0x5B38Da6a701c568545dCfcB03FcB875f56beddC4").unwrap()
    }

    #[test]
    fn set_then_get_within_ttl() {
        let (clock, cache) = setup();
        cache.set(&token(), InterfaceId::ERC20, true);
        clock.advance(600);
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), Some(true));
    }

    #[test]
    fn sub_second_ttl_rounds_up() {
        let clock = Arc::new(ManualClock(AtomicU64::new(1_000)));
        let cache = InterfaceCache::new(Duration::from_millis(1500), clock.clone());
        assert_eq!(cache.ttl(), Duration::from_secs(2));

        let cache = InterfaceCache::new(Duration::from_millis(500), clock.clone());
        assert_eq!(cache.ttl(), Duration::from_secs(1));
        cache.set(&token(), InterfaceId::ERC20, true);
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), Some(true));
        clock.advance(2);
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), None);
    }

    #[test]
    fn unsupported_is_remembered_too() {
        let (_clock, cache) = setup();
        cache.set(&token(), InterfaceId::ERC165, false);
        assert_eq!(cache.get(&token(), InterfaceId::ERC165), Some(false));
    }

    #[test]
    fn expired_read_is_unknown_and_evicts() {
        let (clock, cache) = setup();
        cache.set(&token(), InterfaceId::ERC20, true);
        clock.advance(601);
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn lookup_ignores_address_case() {
        let (_clock, cache) = setup();
        let lower = EvmAddress::parse("0x5b38da6a701c568545dcfcb03fcb875f56beddc4").unwrap();
        cache.set(&token(), InterfaceId::ERC20, true);
        assert_eq!(cache.get(&lower, InterfaceId::ERC20), Some(true));
    }

    #[test]
    fn set_overwrites_and_refreshes() {
        let (clock, cache) = setup();
        cache.set(&token(), InterfaceId::ERC20, true);
        clock.advance(500);
        cache.set(&token(), InterfaceId::ERC20, false);
        clock.advance(500);
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), Some(false));
    }

    #[test]
    fn clean_expired_only_removes_stale_entries() {
        let (clock, cache) = setup();
        let other = EvmAddress::new([0x22; 20]);
        cache.set(&token(), InterfaceId::ERC20, true);
        clock.advance(400);
        cache.set(&other, InterfaceId::ERC20, true);
        clock.advance(300);

        assert_eq!(cache.clean_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&other, InterfaceId::ERC20), Some(true));
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let (_clock, cache) = setup();
        assert_eq!(cache.get(&token(), InterfaceId::ERC20), None);
        cache.set(&token(), InterfaceId::ERC20, true);
        cache.get(&token(), InterfaceId::ERC20);
        cache.get(&token(), InterfaceId::ERC20);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (2, 1, 1));
    }
}
