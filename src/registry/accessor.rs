//! Snapshot access and the exhaustiveness check.

use std::sync::Arc;

use tracing::{trace, warn};

use super::{SymbolMap, SymbolRegistry};
use crate::base::SymbolName;
use crate::config::FinderConfig;
use crate::error::ConfigurationError;

/// Wraps a [`SymbolRegistry`] together with the project it serves.
#[derive(Debug)]
pub struct RegistryAccessor<R> {
    registry: R,
    config: FinderConfig,
}

impl<R: SymbolRegistry> RegistryAccessor<R> {
    pub fn new(registry: R, config: FinderConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Fetch the current snapshot.
    pub fn get_registry(&self) -> Arc<SymbolMap> {
        self.registry.lookup()
    }

    /// Verify that the registry is exhaustive.
    ///
    /// Every configured probe symbol is force-resolved. One that resolves but
    /// is missing from the snapshot can only have come from the fallback
    /// path, so the snapshot is an undercount.
    ///
    /// Probing can materialize lazily-resolved symbols in the registry, so
    /// this is not run implicitly by queries.
    pub fn check_state(&self) -> Result<(), ConfigurationError> {
        let snapshot = self.registry.lookup();

        for raw in self.config.probe_symbols() {
            let Some(probe) = SymbolName::new(raw) else {
                continue;
            };
            if snapshot.contains_key(&probe) {
                trace!(%probe, "probe present in primary map");
                continue;
            }
            if !self.registry.probe(&probe) {
                trace!(%probe, "probe does not resolve");
                continue;
            }

            warn!(
                %probe,
                project = self.config.project(),
                "symbol registry is partial"
            );
            return Err(ConfigurationError {
                project: self.config.project().to_owned(),
                root: self.config.root().to_path_buf(),
                tool: self.config.tool().to_owned(),
                command: self.config.regenerate_command().to_owned(),
                probe,
            });
        }

        Ok(())
    }
}
