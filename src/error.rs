//! Error types.

use std::path::PathBuf;

use crate::base::SymbolName;

/// The registry is serving a partial symbol map.
///
/// Only fixable by regenerating the registry, so the message always says how.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "{project} needs an exhaustive symbol registry, but the one generated by {tool} is partial \
     ('{probe}' resolved outside the primary map). Run `{command}` in {} to regenerate it.",
    .root.display()
)]
pub struct ConfigurationError {
    /// Host project identifier.
    pub project: String,
    /// Host project root.
    pub root: PathBuf,
    /// Tool that generates the registry.
    pub tool: String,
    /// Command that regenerates an exhaustive registry.
    pub command: String,
    /// The fallback-only symbol that gave the registry away.
    pub probe: SymbolName,
}

/// A filter could not inspect a symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntrospectionError {
    #[error("symbol not found: {0}")]
    NotFound(SymbolName),

    #[error("cannot introspect {name}: {reason}")]
    Failed { name: SymbolName, reason: String },
}

/// Any failure surfaced by [`SymbolFinder::find`](crate::SymbolFinder::find).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FinderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}
