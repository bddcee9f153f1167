//! Per-finder query cache.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::DependencyScope;
use crate::base::SymbolName;

/// Cache key: normalized prefix plus dependency scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub prefix: SmolStr,
    pub scope: DependencyScope,
}

type Slot = Arc<OnceLock<Arc<[SymbolName]>>>;

/// Prefix-matched, scope-applied results, computed once per key.
///
/// Entries are never evicted, so a key keeps returning its first result even
/// if the registry changes afterwards. Concurrent callers asking for the same
/// key block until the first computation finishes.
#[derive(Default)]
pub struct QueryCache {
    slots: Mutex<FxHashMap<CacheKey, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `key`, computing it with `compute` on a
    /// miss. The second element is `true` on a hit.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> (Arc<[SymbolName]>, bool)
    where
        F: FnOnce() -> Vec<SymbolName>,
    {
        // Only the map is locked; the slot serializes the computation.
        let slot = Arc::clone(self.slots.lock().entry(key).or_default());

        let mut computed = false;
        let symbols = slot.get_or_init(|| {
            computed = true;
            compute().into()
        });
        (Arc::clone(symbols), !computed)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<[SymbolName]>> {
        let slots = self.slots.lock();
        slots.get(key)?.get().cloned()
    }

    /// Number of keys with a computed result.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every result. For owners that regenerated the registry.
    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("count", &self.len())
            .finish()
    }
}
