// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use trackview_view::{Transform, ViewError, ViewState};

use crate::config::CacheConfig;
use crate::key::ViewKey;

/// Counters describing cache traffic since creation or the last
/// [`TransformCache::clear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to build a transform.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
}

/// Bounded least-recently-used memo of [`Transform`]s keyed by [`ViewKey`].
///
/// The cache is `Send + Sync`. All shared state sits behind one mutex that
/// is held only for map lookups and inserts; transform construction runs
/// outside the lock. A cold cache and a warm cache return transforms with
/// identical outputs for identical states.
#[derive(Debug)]
pub struct TransformCache {
    config: CacheConfig,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<ViewKey, Entry>,
    // Access stamp -> key, oldest first.
    recency: BTreeMap<u64, ViewKey>,
    clock: u64,
    stats: CacheStats,
}

#[derive(Debug)]
struct Entry {
    transform: Arc<Transform>,
    stamp: u64,
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl TransformCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The configuration this cache was created with.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the transform for `view`, building and inserting it on a miss.
    ///
    /// A hit marks the entry most recently used. A miss that pushes the cache
    /// over capacity evicts the least recently used entry.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewError`] from [`Transform::build`]; nothing is inserted
    /// in that case.
    pub fn get_or_build(&self, view: &ViewState) -> Result<Arc<Transform>, ViewError> {
        let key = self.key(view);
        if let Some(hit) = self.lock().touch(&key) {
            return Ok(hit);
        }
        let built = Arc::new(Transform::build(view)?);
        let capacity = self.config.capacity.max(1);
        Ok(self.lock().insert(key, built, capacity))
    }

    /// Returns the cached transform for `view` without building one.
    ///
    /// A hit marks the entry most recently used.
    #[must_use]
    pub fn get(&self, view: &ViewState) -> Option<Arc<Transform>> {
        let key = self.key(view);
        self.lock().touch(&key)
    }

    /// Returns `true` if `view` has a cached transform. Does not affect
    /// recency or statistics.
    #[must_use]
    pub fn contains(&self, view: &ViewState) -> bool {
        let key = self.key(view);
        self.lock().entries.contains_key(&key)
    }

    /// Number of cached transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the traffic counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        *self.lock() = Inner::default();
    }

    fn key(&self, view: &ViewState) -> ViewKey {
        ViewKey::quantize(view, &self.config)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves `Inner` consistent, so a poisoned
        // lock is still safe to use.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn next_stamp(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, key: &ViewKey) -> Option<Arc<Transform>> {
        let stamp = self.next_stamp();
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.misses += 1;
            return None;
        };
        self.recency.remove(&entry.stamp);
        entry.stamp = stamp;
        self.recency.insert(stamp, *key);
        self.stats.hits += 1;
        tracing::trace!(?key, "transform cache hit");
        Some(Arc::clone(&entry.transform))
    }

    fn insert(&mut self, key: ViewKey, built: Arc<Transform>, capacity: usize) -> Arc<Transform> {
        let stamp = self.next_stamp();
        if let Some(entry) = self.entries.get_mut(&key) {
            // Another thread inserted this key while we were building; keep
            // the existing instance so one key maps to one transform.
            self.recency.remove(&entry.stamp);
            entry.stamp = stamp;
            self.recency.insert(stamp, key);
            return Arc::clone(&entry.transform);
        }
        self.entries.insert(
            key,
            Entry {
                transform: Arc::clone(&built),
                stamp,
            },
        );
        self.recency.insert(stamp, key);
        tracing::debug!(?key, len = self.entries.len(), "transform cache insert");

        while self.entries.len() > capacity {
            let Some((_, victim)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.evictions += 1;
            tracing::debug!(key = ?victim, "transform cache evict");
        }
        built
    }
}
