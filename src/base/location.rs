//! Source locations attached to registry entries.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Where a symbol is defined, as reported by the registry.
///
/// Opaque: the only question ever asked of it is whether it lies inside
/// some directory.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SourceLocation(Arc<str>);

impl SourceLocation {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&*self.0)
    }

    /// The location as a path, relative locations joined to `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let path = self.as_path();
        if path.is_relative() {
            clean(&root.join(path))
        } else {
            clean(path)
        }
    }

    /// Check if this location is `dir` or somewhere below it.
    ///
    /// Relative locations are taken from `root`. Compares whole path
    /// components, so `/p/vendor-tools/x` is not inside `/p/vendor`.
    pub fn is_within(&self, dir: &Path, root: &Path) -> bool {
        self.resolve(root).starts_with(clean(dir))
    }
}

/// Drop `.` components. Purely lexical; `..` is kept as is.
pub fn clean(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceLocation({:?})", &*self.0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceLocation {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for SourceLocation {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
