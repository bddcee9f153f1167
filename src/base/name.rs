//! Symbol names and namespace-prefix helpers.

use smol_str::SmolStr;
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Canonical segment separator.
pub const SEPARATOR: &str = "::";

/// Separators accepted in input and rewritten to [`SEPARATOR`].
const ALT_SEPARATORS: [char; 3] = ['\\', '/', '.'];

/// A fully-qualified symbol name, e.g. `Acme::Plugins::Exporter`.
///
/// Stored as given by the registry. Matching is done against the
/// [normalized](SymbolName::normalized) form.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolName(SmolStr);

impl SymbolName {
    /// Create a name. Returns `None` for an empty string.
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref();
        if name.is_empty() {
            None
        } else {
            Some(Self(SmolStr::new(name)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with every separator rewritten to `::`.
    pub fn normalized(&self) -> Cow<'_, str> {
        normalize(&self.0)
    }

    /// Segments of the normalized name.
    pub fn segments(&self) -> Vec<SmolStr> {
        self.normalized()
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(SmolStr::new)
            .collect()
    }

    /// Check whether this name lies under `prefix` (already normalized).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        starts_with(prefix, &self.normalized())
    }
}

impl fmt::Debug for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolName({:?})", self.0.as_str())
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SymbolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SymbolName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SymbolName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Rewrite alternate separators (`\`, `/`, `.`) to `::`.
///
/// Borrows when the input is already canonical.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if !raw.contains(ALT_SEPARATORS) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        if ALT_SEPARATORS.contains(&ch) {
            out.push_str(SEPARATOR);
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Case-sensitive raw prefix test. An empty prefix matches everything.
pub fn starts_with(prefix: &str, haystack: &str) -> bool {
    haystack.starts_with(prefix)
}
