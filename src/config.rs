//! Finder configuration.
//!
//! Describes the host project (used for scope restriction and for the
//! remediation text of [`ConfigurationError`](crate::ConfigurationError))
//! and which symbols the state check probes.

use std::path::{Path, PathBuf};

use crate::base::clean;

/// Default dependency directory, relative to the project root.
pub const DEFAULT_DEPENDENCY_DIR: &str = "vendor";

/// Configuration for a [`SymbolFinder`](crate::SymbolFinder).
#[derive(Clone, Debug)]
pub struct FinderConfig {
    project: String,
    root: PathBuf,
    dependency_dir: Option<PathBuf>,
    tool: String,
    regenerate_command: String,
    probe_symbols: Vec<String>,
}

impl Default for FinderConfig {
    /// A Composer-style project rooted at the current directory.
    fn default() -> Self {
        Self {
            project: String::from("root"),
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            dependency_dir: None,
            tool: String::from("composer/composer"),
            regenerate_command: String::from("composer dump-autoload -o"),
            probe_symbols: vec![
                String::from("PHPUnit\\Framework\\TestCase"),
                String::from("SebastianBergmann\\Diff\\Differ"),
                String::from("PHP_Token_Stream"),
            ],
        }
    }
}

impl FinderConfig {
    pub fn new(project: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            root: root.into(),
            ..Self::default()
        }
    }

    /// Override the dependency directory. Relative paths are joined to the root.
    pub fn with_dependency_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dependency_dir = Some(dir.into());
        self
    }

    /// Set the registry generator and the command that makes it exhaustive.
    pub fn with_generator(mut self, tool: impl Into<String>, command: impl Into<String>) -> Self {
        self.tool = tool.into();
        self.regenerate_command = command.into();
        self
    }

    /// Replace the symbols probed by the state check.
    ///
    /// Each should exist only through the registry's fallback path when the
    /// registry is partial. Spell them exactly as the registry keys them.
    pub fn with_probes<S>(mut self, symbols: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
    {
        self.probe_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory whose contents count as third-party dependencies.
    pub fn dependency_dir(&self) -> PathBuf {
        let dir = match &self.dependency_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.root.join(dir),
            None => self.root.join(DEFAULT_DEPENDENCY_DIR),
        };
        clean(&dir)
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn regenerate_command(&self) -> &str {
        &self.regenerate_command
    }

    pub fn probe_symbols(&self) -> &[String] {
        &self.probe_symbols
    }
}
