//! The symbol registry boundary.
//!
//! The registry itself (an autoloader class map, a build system's symbol
//! table, ...) lives outside this crate. It is consumed through two traits:
//!
//! - [`SymbolRegistry`] - a cheap snapshot lookup plus an expensive
//!   force-resolve probe
//! - [`Introspector`] - structural questions about a single symbol, used by
//!   filters only
//!
//! [`RegistryAccessor`] sits on top and decides whether a registry can be
//! trusted for enumeration.

mod accessor;
mod memory;

use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::{SourceLocation, SymbolName};
use crate::error::IntrospectionError;

pub use accessor::RegistryAccessor;
pub use memory::StaticRegistry;

/// A registry snapshot, in registry iteration order.
pub type SymbolMap = IndexMap<SymbolName, SourceLocation>;

/// A source of symbol → location mappings.
pub trait SymbolRegistry {
    /// Current snapshot of the primary map.
    ///
    /// Complete when the registry is exhaustive, an undercount otherwise.
    fn lookup(&self) -> Arc<SymbolMap>;

    /// Force-resolve `name` through every discovery path the registry has,
    /// including lazy fallbacks. May have side effects on the registry.
    fn probe(&self, name: &SymbolName) -> bool;
}

impl<R: SymbolRegistry + ?Sized> SymbolRegistry for Arc<R> {
    fn lookup(&self) -> Arc<SymbolMap> {
        (**self).lookup()
    }

    fn probe(&self, name: &SymbolName) -> bool {
        (**self).probe(name)
    }
}

impl<R: SymbolRegistry + ?Sized> SymbolRegistry for Rc<R> {
    fn lookup(&self) -> Arc<SymbolMap> {
        (**self).lookup()
    }

    fn probe(&self, name: &SymbolName) -> bool {
        (**self).probe(name)
    }
}

impl<R: SymbolRegistry + ?Sized> SymbolRegistry for &R {
    fn lookup(&self) -> Arc<SymbolMap> {
        (**self).lookup()
    }

    fn probe(&self, name: &SymbolName) -> bool {
        (**self).probe(name)
    }
}

/// Structural facts about one symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymbolInfo {
    pub exists: bool,
    pub is_abstract: bool,
}

/// Reflection over symbols.
pub trait Introspector {
    fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError>;
}

impl<I: Introspector + ?Sized> Introspector for Arc<I> {
    fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError> {
        (**self).introspect(name)
    }
}

impl<I: Introspector + ?Sized> Introspector for Rc<I> {
    fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError> {
        (**self).introspect(name)
    }
}

impl<I: Introspector + ?Sized> Introspector for &I {
    fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError> {
        (**self).introspect(name)
    }
}
