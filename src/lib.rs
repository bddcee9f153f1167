//! # symbol-finder
//!
//! Enumerate every symbol under a namespace prefix by consulting a
//! precomputed symbol registry instead of walking the filesystem.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! finder    → prefix matching, query cache, filters
//!   ↓
//! registry  → registry traits, snapshot access, exhaustiveness check
//!   ↓
//! config    → host project description
//!   ↓
//! base      → primitives (SymbolName, SourceLocation)
//! ```
//!
//! ## Usage
//!
//! ```
//! use symfind::{DependencyScope, FinderConfig, StaticRegistry, SymbolFinder};
//!
//! let registry = StaticRegistry::from_entries([
//!     ("Acme\\Plugins\\Csv", "/app/src/Plugins/Csv.php"),
//!     ("Acme\\Plugins\\Json", "/app/src/Plugins/Json.php"),
//!     ("Acme\\Kernel", "/app/src/Kernel.php"),
//! ]);
//! let finder = SymbolFinder::new(registry, FinderConfig::new("acme/app", "/app"));
//!
//! finder.check_state().unwrap();
//! let plugins = finder
//!     .get_symbols("Acme\\Plugins\\", None, DependencyScope::Include)
//!     .unwrap();
//! assert_eq!(plugins.len(), 2);
//! ```

/// Foundation types: SymbolName, SourceLocation
pub mod base;

/// Host project configuration
pub mod config;

/// Error types
pub mod error;

/// Prefix matching and the query cache
pub mod finder;

/// Registry boundary and exhaustiveness check
pub mod registry;

pub use base::{SourceLocation, SymbolName};
pub use config::FinderConfig;
pub use error::{ConfigurationError, FinderError, IntrospectionError};
pub use finder::{DependencyScope, QueryCache, SymbolFilter, SymbolFinder};
pub use registry::{
    Introspector, RegistryAccessor, StaticRegistry, SymbolInfo, SymbolMap, SymbolRegistry,
};
