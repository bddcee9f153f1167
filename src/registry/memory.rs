//! In-memory registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use super::{Introspector, SymbolInfo, SymbolMap, SymbolRegistry};
use crate::base::{SourceLocation, SymbolName};
use crate::error::IntrospectionError;

/// A registry held entirely in memory.
///
/// Two tiers, like a real autoloader:
/// - the primary map, returned by [`lookup`](SymbolRegistry::lookup)
/// - fallback-only symbols, visible to [`probe`](SymbolRegistry::probe)
///   but missing from snapshots (a registry with any of these is partial)
///
/// Snapshots are copy-on-write: handing one out is an `Arc` clone, and
/// later inserts never affect snapshots already taken.
#[derive(Default)]
pub struct StaticRegistry {
    primary: RwLock<Arc<SymbolMap>>,
    fallback: RwLock<SymbolMap>,
    abstract_symbols: RwLock<FxHashSet<SymbolName>>,
    lookups: AtomicUsize,
}

impl StaticRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(name, location)` pairs, in order.
    ///
    /// Pairs with an empty name are skipped.
    pub fn from_entries<I, N, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: AsRef<str>,
        L: Into<SourceLocation>,
    {
        let registry = Self::new();
        for (name, location) in entries {
            registry.insert(name, location);
        }
        registry
    }

    /// Add or replace a symbol in the primary map.
    ///
    /// Returns `false` if `name` is empty.
    pub fn insert(&self, name: impl AsRef<str>, location: impl Into<SourceLocation>) -> bool {
        let Some(name) = SymbolName::new(name) else {
            return false;
        };
        let mut primary = self.primary.write();
        Arc::make_mut(&mut *primary).insert(name, location.into());
        true
    }

    /// Add a symbol that only the fallback path can resolve.
    pub fn insert_fallback(
        &self,
        name: impl AsRef<str>,
        location: impl Into<SourceLocation>,
    ) -> bool {
        let Some(name) = SymbolName::new(name) else {
            return false;
        };
        self.fallback.write().insert(name, location.into());
        true
    }

    /// Mark a known symbol as abstract.
    pub fn mark_abstract(&self, name: impl AsRef<str>) {
        if let Some(name) = SymbolName::new(name) {
            self.abstract_symbols.write().insert(name);
        }
    }

    /// Remove a symbol from the primary map.
    pub fn remove(&self, name: &str) -> Option<SourceLocation> {
        let mut primary = self.primary.write();
        Arc::make_mut(&mut *primary).shift_remove(name)
    }

    /// Move every fallback symbol into the primary map, making the registry
    /// exhaustive.
    pub fn optimize(&self) {
        let mut primary = self.primary.write();
        let mut fallback = self.fallback.write();
        let map = Arc::make_mut(&mut *primary);
        for (name, location) in fallback.drain(..) {
            map.entry(name).or_insert(location);
        }
    }

    /// Check whether any symbol is only reachable through the fallback path.
    pub fn is_partial(&self) -> bool {
        !self.fallback.read().is_empty()
    }

    /// Number of [`lookup`](SymbolRegistry::lookup) calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of symbols in the primary map.
    pub fn len(&self) -> usize {
        self.primary.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SymbolRegistry for StaticRegistry {
    fn lookup(&self) -> Arc<SymbolMap> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Arc::clone(&*self.primary.read())
    }

    fn probe(&self, name: &SymbolName) -> bool {
        self.primary.read().contains_key(name) || self.fallback.read().contains_key(name)
    }
}

impl Introspector for StaticRegistry {
    fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError> {
        if !self.probe(name) {
            return Err(IntrospectionError::NotFound(name.clone()));
        }
        Ok(SymbolInfo {
            exists: true,
            is_abstract: self.abstract_symbols.read().contains(name),
        })
    }
}

impl std::fmt::Debug for StaticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRegistry")
            .field("primary", &self.primary.read().len())
            .field("fallback", &self.fallback.read().len())
            .finish()
    }
}
