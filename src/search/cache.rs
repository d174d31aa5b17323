// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded LRU cache shared by retrieval and aggregation.
//!
//! Values are `Arc<Vec<V>>` so a hit is a pointer copy. The lock is held only
//! for the map operation itself; computing a missing value happens outside it,
//! so two threads racing on the same key may both compute.
//!
//! An empty computed value is never stored. It clears the whole cache instead,
//! which keeps stale results from surviving an index append.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

/// Cached value plus whether it came from the cache.
#[derive(Debug)]
pub struct Lookup<V> {
    pub value: Arc<Vec<V>>,
    pub hit: bool,
}

#[derive(Debug)]
pub struct QueryCache<K: Hash + Eq, V> {
    inner: Mutex<LruCache<K, Arc<Vec<V>>>>,
}

impl<K: Hash + Eq, V> QueryCache<K, V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up `key`, refreshing its recency.
    pub fn get(&self, key: &K) -> Option<Arc<Vec<V>>> {
        self.inner.lock().get(key).cloned()
    }

    /// Return the cached value for `key`, computing it on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> Lookup<V>
    where
        F: FnOnce() -> Vec<V>,
    {
        if let Some(value) = self.get(&key) {
            return Lookup { value, hit: true };
        }

        let value = Arc::new(compute());
        if value.is_empty() {
            self.clear();
        } else {
            self.inner.lock().put(key, Arc::clone(&value));
        }
        Lookup { value, hit: false }
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
