//! Filters applied to prefix-matched symbols.

use crate::base::SymbolName;
use crate::error::IntrospectionError;
use crate::registry::Introspector;

/// Decides whether a symbol belongs in a result.
///
/// Implemented for any `Fn(&SymbolName) -> Result<bool, IntrospectionError>`.
pub trait SymbolFilter {
    fn matches(&self, name: &SymbolName) -> Result<bool, IntrospectionError>;
}

impl<F> SymbolFilter for F
where
    F: Fn(&SymbolName) -> Result<bool, IntrospectionError>,
{
    fn matches(&self, name: &SymbolName) -> Result<bool, IntrospectionError> {
        self(name)
    }
}

/// Keeps symbols that are not abstract.
#[derive(Clone, Copy, Debug)]
pub struct Concrete<I>(pub I);

impl<I: Introspector> SymbolFilter for Concrete<I> {
    fn matches(&self, name: &SymbolName) -> Result<bool, IntrospectionError> {
        Ok(!self.0.introspect(name)?.is_abstract)
    }
}

/// Keeps abstract symbols only.
#[derive(Clone, Copy, Debug)]
pub struct Abstract<I>(pub I);

impl<I: Introspector> SymbolFilter for Abstract<I> {
    fn matches(&self, name: &SymbolName) -> Result<bool, IntrospectionError> {
        Ok(self.0.introspect(name)?.is_abstract)
    }
}

/// Keeps symbols the introspector reports as existing.
///
/// Unlike [`Concrete`] and [`Abstract`], a `NotFound` error is treated as a
/// plain `false`.
#[derive(Clone, Copy, Debug)]
pub struct Loadable<I>(pub I);

impl<I: Introspector> SymbolFilter for Loadable<I> {
    fn matches(&self, name: &SymbolName) -> Result<bool, IntrospectionError> {
        match self.0.introspect(name) {
            Ok(info) => Ok(info.exists),
            Err(IntrospectionError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
