//! Foundation types for symbol lookup.
//!
//! - [`SymbolName`] - Fully-qualified symbol names and prefix matching
//! - [`SourceLocation`] - Opaque definition locations
//!
//! This module has NO dependencies on other modules of the crate.

mod location;
mod name;

pub use location::{SourceLocation, clean};
pub use name::{SEPARATOR, SymbolName, normalize, starts_with};
