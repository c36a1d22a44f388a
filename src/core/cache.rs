//! Bounded memo for pure, expensive per-state computations.
//!
//! Problems own a `StateCache` for things like conflict counts or pattern
//! counts that the engine asks for repeatedly. Entries are keyed by state
//! *value*, so the cache is only correct because states are never mutated
//! after the engine has seen them.
//!
//! The cache holds at most `capacity` entries and evicts the least recently
//! used one when full. It uses `RefCell` so it can be filled through the
//! `&self` receivers of the problem traits; it is therefore not `Sync`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
struct Slots<K, V> {
    /// Value and the tick of its last use.
    entries: FxHashMap<K, (V, u64)>,
    /// Last-use tick -> key, oldest first.
    recency: BTreeMap<u64, K>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V> Slots<K, V> {
    /// Drop the oldest entries until at most `limit` remain.
    fn evict_to_fit(&mut self, limit: usize) {
        while self.entries.len() > limit {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }
}

/// Least-recently-used cache keyed by state value.
///
/// ## Example
///
/// ```
/// use sealgo::core::StateCache;
///
/// let cache: StateCache<u32, u32> = StateCache::new(2);
/// assert_eq!(cache.get_or_insert_with(&3, || 9), 9);
/// assert_eq!(cache.get_or_insert_with(&3, || unreachable!()), 9);
/// assert_eq!(cache.hits(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct StateCache<K, V> {
    capacity: usize,
    slots: RefCell<Slots<K, V>>,
}

impl<K: Clone + Eq + Hash, V: Clone> StateCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            slots: RefCell::new(Slots {
                entries: FxHashMap::default(),
                recency: BTreeMap::new(),
                tick: 0,
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without the cache borrowed, so it may itself use the
    /// cache.
    pub fn get_or_insert_with(&self, key: &K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.lookup(key) {
            return value;
        }

        let value = compute();
        self.insert(key.clone(), value.clone());
        value
    }

    fn lookup(&self, key: &K) -> Option<V> {
        let mut guard = self.slots.borrow_mut();
        let slots = &mut *guard;
        slots.tick += 1;
        let tick = slots.tick;

        let Some((value, last_used)) = slots.entries.get_mut(key) else {
            slots.misses += 1;
            return None;
        };
        let previous = std::mem::replace(last_used, tick);
        let value = value.clone();

        if let Some(k) = slots.recency.remove(&previous) {
            slots.recency.insert(tick, k);
        }
        slots.hits += 1;
        Some(value)
    }

    fn insert(&self, key: K, value: V) {
        let mut guard = self.slots.borrow_mut();
        let slots = &mut *guard;
        slots.tick += 1;
        let tick = slots.tick;

        if let Some((_, previous)) = slots.entries.remove(&key) {
            slots.recency.remove(&previous);
        }

        slots.evict_to_fit(self.capacity - 1);
        slots.recency.insert(tick, key.clone());
        slots.entries.insert(key, (value, tick));
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.borrow().entries.contains_key(key)
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.slots.borrow().hits
    }

    /// Number of lookups that had to compute.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.slots.borrow().misses
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        let mut slots = self.slots.borrow_mut();
        slots.entries.clear();
        slots.recency.clear();
        slots.hits = 0;
        slots.misses = 0;
    }
}
