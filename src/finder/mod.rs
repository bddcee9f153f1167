//! Prefix matching over the symbol registry.
//!
//! [`SymbolFinder`] answers "which symbols live under this namespace?"
//! in three layers:
//!
//! 1. **Prefix match** - one full scan of a fresh registry snapshot
//! 2. **Scope restriction** - optionally drop symbols defined inside the
//!    dependency directory
//! 3. **Filter** - caller-supplied [`SymbolFilter`], re-run on every call
//!
//! Layers 1 and 2 are cached per (prefix, scope) in a [`QueryCache`] owned by
//! the finder. Layer 3 never is, so a failing filter cannot poison the cache.

mod cache;
pub mod filter;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{SourceLocation, SymbolName, clean, normalize};
use crate::config::FinderConfig;
use crate::error::{ConfigurationError, FinderError, IntrospectionError};
use crate::registry::{RegistryAccessor, SymbolMap, SymbolRegistry};

pub use cache::{CacheKey, QueryCache};
pub use filter::SymbolFilter;

/// Whether symbols defined in third-party dependencies are included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    /// Everything in the registry.
    #[default]
    Include,
    /// Only symbols whose location is outside the dependency directory.
    Exclude,
}

impl DependencyScope {
    /// Check if a symbol defined at `location` is in scope. Relative
    /// locations are taken from the project `root`.
    pub fn admits(self, location: &SourceLocation, dependency_dir: &Path, root: &Path) -> bool {
        match self {
            DependencyScope::Include => true,
            DependencyScope::Exclude => !location.is_within(dependency_dir, root),
        }
    }
}

impl From<bool> for DependencyScope {
    /// `true` includes dependencies.
    fn from(include_dependencies: bool) -> Self {
        if include_dependencies {
            DependencyScope::Include
        } else {
            DependencyScope::Exclude
        }
    }
}

/// Enumerates symbols by namespace prefix.
#[derive(Debug)]
pub struct SymbolFinder<R> {
    accessor: RegistryAccessor<R>,
    cache: QueryCache,
    root: PathBuf,
    dependency_dir: PathBuf,
    verified: AtomicBool,
}

impl<R: SymbolRegistry> SymbolFinder<R> {
    pub fn new(registry: R, config: FinderConfig) -> Self {
        let root = clean(config.root());
        let dependency_dir = config.dependency_dir();
        Self {
            accessor: RegistryAccessor::new(registry, config),
            cache: QueryCache::new(),
            root,
            dependency_dir,
            verified: AtomicBool::new(false),
        }
    }

    pub fn accessor(&self) -> &RegistryAccessor<R> {
        &self.accessor
    }

    pub fn registry(&self) -> &R {
        self.accessor.registry()
    }

    pub fn config(&self) -> &FinderConfig {
        self.accessor.config()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Verify that the registry is exhaustive. See
    /// [`RegistryAccessor::check_state`].
    pub fn check_state(&self) -> Result<(), ConfigurationError> {
        self.accessor.check_state()
    }

    /// Like [`check_state`](Self::check_state), but only probes until the
    /// first success. Failures are reported on every call.
    pub fn ensure_exhaustive(&self) -> Result<(), ConfigurationError> {
        if self.verified.load(Ordering::Acquire) {
            return Ok(());
        }
        self.accessor.check_state()?;
        self.verified.store(true, Ordering::Release);
        Ok(())
    }

    /// Symbols under `prefix`, in registry order.
    ///
    /// An empty prefix matches every symbol. The prefix-and-scope match is
    /// computed once per (prefix, scope) and reused for the lifetime of the
    /// finder; `filter` runs against it on every call and its first error
    /// aborts the call.
    pub fn get_symbols(
        &self,
        prefix: &str,
        filter: Option<&dyn SymbolFilter>,
        scope: DependencyScope,
    ) -> Result<Vec<SymbolName>, IntrospectionError> {
        let matched = self.matched(prefix, scope);

        let Some(filter) = filter else {
            return Ok(matched.to_vec());
        };

        let mut symbols = Vec::with_capacity(matched.len());
        for name in matched.iter() {
            if filter.matches(name)? {
                symbols.push(name.clone());
            }
        }
        Ok(symbols)
    }

    /// All symbols under `prefix`, dependencies included, unfiltered.
    pub fn symbols(&self, prefix: &str) -> Vec<SymbolName> {
        self.matched(prefix, DependencyScope::Include).to_vec()
    }

    /// [`ensure_exhaustive`](Self::ensure_exhaustive), then
    /// [`get_symbols`](Self::get_symbols).
    pub fn find(
        &self,
        prefix: &str,
        filter: Option<&dyn SymbolFilter>,
        scope: DependencyScope,
    ) -> Result<Vec<SymbolName>, FinderError> {
        self.ensure_exhaustive()?;
        Ok(self.get_symbols(prefix, filter, scope)?)
    }

    /// Prefix-and-scope match, from the cache or a fresh scan.
    fn matched(&self, prefix: &str, scope: DependencyScope) -> Arc<[SymbolName]> {
        let key = CacheKey {
            prefix: SmolStr::new(normalize(prefix)),
            scope,
        };

        let (matched, hit) = self.cache.get_or_compute(key.clone(), || {
            let snapshot = self.accessor.get_registry();
            let matched = scan(&snapshot, &key.prefix, scope, &self.dependency_dir, &self.root);
            debug!(
                prefix = %key.prefix,
                ?scope,
                registry = snapshot.len(),
                matched = matched.len(),
                "scanned symbol registry"
            );
            matched
        });
        if hit {
            trace!(prefix = %key.prefix, ?scope, "symbol query cache hit");
        }
        matched
    }
}

fn scan(
    snapshot: &SymbolMap,
    prefix: &str,
    scope: DependencyScope,
    dependency_dir: &Path,
    root: &Path,
) -> Vec<SymbolName> {
    snapshot
        .iter()
        .filter(|(name, _)| name.has_prefix(prefix))
        .filter(|(_, location)| scope.admits(location, dependency_dir, root))
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticRegistry;
    use rstest::rstest;

    fn finder(entries: &[(&str, &str)]) -> SymbolFinder<StaticRegistry> {
        let registry = StaticRegistry::from_entries(entries.iter().copied());
        SymbolFinder::new(registry, FinderConfig::new("acme/app", "/app"))
    }

    fn strs(symbols: &[SymbolName]) -> Vec<&str> {
        symbols.iter().map(SymbolName::as_str).collect()
    }

    #[test]
    fn test_scan_order_and_prefix() {
        let finder = finder(&[
            ("A::C", "/app/src/C"),
            ("X::Y", "/app/src/Y"),
            ("A::B", "/app/src/B"),
        ]);
        assert_eq!(strs(&finder.symbols("A::")), ["A::C", "A::B"]);
    }

    #[rstest]
    #[case("A\\", &["A::B", "A::C"])]
    #[case("A/", &["A::B", "A::C"])]
    #[case("A::", &["A::B", "A::C"])]
    #[case("", &["A::B", "A::C", "X::Y"])]
    #[case("a::", &[])]
    fn test_prefix_normalization(#[case] prefix: &str, #[case] expected: &[&str]) {
        let finder = finder(&[
            ("A\\B", "/app/src/B"),
            ("A\\C", "/app/src/C"),
            ("X\\Y", "/app/src/Y"),
        ]);
        let symbols = finder.symbols(prefix);
        let normalized: Vec<_> = symbols.iter().map(|s| s.normalized().into_owned()).collect();
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_returns_registry_spelling() {
        let finder = finder(&[("Psr\\Log\\NullLogger", "/app/vendor/psr/NullLogger.php")]);
        assert_eq!(strs(&finder.symbols("Psr::Log::")), ["Psr\\Log\\NullLogger"]);
    }

    #[test]
    fn test_dependency_scope_admits() {
        let root = Path::new("/app");
        let dir = Path::new("/app/vendor");
        let vendored = SourceLocation::from("/app/vendor/x/Y.php");
        let relative = SourceLocation::from("vendor/x/Y.php");
        let local = SourceLocation::from("/app/src/Y.php");

        assert!(DependencyScope::Include.admits(&vendored, dir, root));
        assert!(!DependencyScope::Exclude.admits(&vendored, dir, root));
        assert!(!DependencyScope::Exclude.admits(&relative, dir, root));
        assert!(DependencyScope::Exclude.admits(&local, dir, root));
        assert_eq!(DependencyScope::from(false), DependencyScope::Exclude);
    }

    #[test]
    fn test_exclude_with_default_config() {
        let cwd = std::env::current_dir().unwrap();
        let absolute = cwd.join("vendor/psr/log/Psr/Log/AbstractLogger.php");
        let registry = StaticRegistry::from_entries([
            ("Psr\\Log\\NullLogger", String::from("vendor/psr/log/Psr/Log/NullLogger.php")),
            ("Psr\\Log\\AbstractLogger", absolute.to_string_lossy().into_owned()),
            ("Psr\\Log\\Local", String::from("./src/Local.php")),
        ]);
        let finder = SymbolFinder::new(registry, FinderConfig::default());

        let excluded = finder
            .get_symbols("Psr\\Log\\", None, DependencyScope::Exclude)
            .unwrap();
        assert_eq!(strs(&excluded), ["Psr\\Log\\Local"]);

        let included = finder
            .get_symbols("Psr\\Log\\", None, DependencyScope::Include)
            .unwrap();
        assert_eq!(included.len(), 3);
    }

    #[test]
    fn test_dot_root_excludes_relative_vendor() {
        let registry = StaticRegistry::from_entries([
            ("A::B", "vendor/a/B.php"),
            ("A::C", "src/C.php"),
        ]);
        let finder = SymbolFinder::new(registry, FinderConfig::new("acme/app", "."));

        let excluded = finder
            .get_symbols("A::", None, DependencyScope::Exclude)
            .unwrap();
        assert_eq!(strs(&excluded), ["A::C"]);
    }

    #[test]
    fn test_single_threaded_collaborators() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::registry::{Introspector, SymbolInfo};

        /// Registry and introspector that log calls through a `RefCell`.
        struct Recording {
            map: Arc<SymbolMap>,
            calls: RefCell<Vec<&'static str>>,
        }

        impl SymbolRegistry for Recording {
            fn lookup(&self) -> Arc<SymbolMap> {
                self.calls.borrow_mut().push("lookup");
                Arc::clone(&self.map)
            }

            fn probe(&self, name: &SymbolName) -> bool {
                self.calls.borrow_mut().push("resolve");
                self.map.contains_key(name)
            }
        }

        impl Introspector for Recording {
            fn introspect(&self, name: &SymbolName) -> Result<SymbolInfo, IntrospectionError> {
                self.calls.borrow_mut().push("introspect");
                Ok(SymbolInfo {
                    exists: true,
                    is_abstract: name.as_str().ends_with("Base"),
                })
            }
        }

        let mut map = SymbolMap::default();
        for name in ["A::Base", "A::Impl"] {
            map.insert(SymbolName::new(name).unwrap(), SourceLocation::from("/app/src/x"));
        }
        let recording = Rc::new(Recording {
            map: Arc::new(map),
            calls: RefCell::new(Vec::new()),
        });
        let finder = SymbolFinder::new(Rc::clone(&recording), FinderConfig::new("acme/app", "/app"));

        let concrete = filter::Concrete(Rc::clone(&recording));
        let symbols = finder
            .get_symbols("A::", Some(&concrete), DependencyScope::Include)
            .unwrap();
        assert_eq!(strs(&symbols), ["A::Impl"]);
        assert_eq!(
            *recording.calls.borrow(),
            ["lookup", "introspect", "introspect"]
        );
    }

    #[test]
    fn test_filter_error_does_not_poison_cache() {
        let finder = finder(&[("A::B", "/app/src/B"), ("A::C", "/app/src/C")]);
        let failing = |name: &SymbolName| -> Result<bool, IntrospectionError> {
            Err(IntrospectionError::Failed {
                name: name.clone(),
                reason: "boom".into(),
            })
        };

        let err = finder
            .get_symbols("A::", Some(&failing), DependencyScope::Include)
            .unwrap_err();
        assert!(matches!(err, IntrospectionError::Failed { .. }));

        let all = finder
            .get_symbols("A::", None, DependencyScope::Include)
            .unwrap();
        assert_eq!(strs(&all), ["A::B", "A::C"]);
        assert_eq!(finder.registry().lookup_count(), 1);
    }

    #[test]
    fn test_filter_error_aborts_early() {
        use std::cell::Cell;

        let finder = finder(&[("A::B", "/app/src/B"), ("A::C", "/app/src/C")]);
        let seen = Cell::new(0);
        let failing = |name: &SymbolName| -> Result<bool, IntrospectionError> {
            seen.set(seen.get() + 1);
            Err(IntrospectionError::NotFound(name.clone()))
        };

        assert!(finder
            .get_symbols("A::", Some(&failing), DependencyScope::Include)
            .is_err());
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_ensure_exhaustive_memoized() {
        let registry = StaticRegistry::from_entries([("A::B", "/app/src/B")]);
        let config = FinderConfig::new("acme/app", "/app").with_probes(["Lazy::Probe"]);
        let finder = SymbolFinder::new(registry, config);

        assert!(finder.ensure_exhaustive().is_ok());

        // Once verified, later fallback-only symbols are not re-probed.
        finder.registry().insert_fallback("Lazy::Probe", "/app/vendor/Probe");
        assert!(finder.ensure_exhaustive().is_ok());
        assert!(finder.check_state().is_err());
    }

    #[test]
    fn test_find_fails_on_partial_registry() {
        let registry = StaticRegistry::from_entries([("A::B", "/app/src/B")]);
        registry.insert_fallback("Lazy::Probe", "/app/vendor/Probe");
        let config = FinderConfig::new("acme/app", "/app").with_probes(["Lazy::Probe"]);
        let finder = SymbolFinder::new(registry, config);

        let err = finder
            .find("A::", None, DependencyScope::Include)
            .unwrap_err();
        assert!(matches!(err, FinderError::Configuration(_)));
        assert!(finder.cache().is_empty());
        assert!(finder.find("A::", None, DependencyScope::Include).is_err());
    }
}
