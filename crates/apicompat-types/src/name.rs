//! Type names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separates the package path from the bare name. Legal in neither.
pub const NAME_SEPARATOR: char = '#';

/// Identifier of a named type: an optional package path and a bare name,
/// e.g. `example.com/pkg#Config`.
///
/// The empty name denotes an unnamed (structural) type.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(pkg_path: &str, name: &str) -> Self {
        if pkg_path.is_empty() {
            TypeName(name.to_string())
        } else {
            TypeName(format!("{}{}{}", pkg_path, NAME_SEPARATOR, name))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package path, or `""` for names without one
    pub fn pkg_path(&self) -> &str {
        self.split().0
    }

    /// The bare name without its package path
    pub fn name(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        match self.0.rfind(NAME_SEPARATOR) {
            Some(i) => (&self.0[..i], &self.0[i + 1..]),
            None => ("", &self.0),
        }
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        TypeName(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        TypeName(s)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
