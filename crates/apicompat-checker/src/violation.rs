//! Compatibility violations

use apicompat_types::Kind;
use std::fmt;
use thiserror::Error;

/// What went wrong at one location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("nil type found")]
    NilType,

    #[error("incompatible kinds {old} vs {new}")]
    IncompatibleKinds { old: Kind, new: Kind },

    #[error("differing parameter count {old} vs {new}")]
    ParamCount { old: usize, new: usize },

    #[error("differing out parameter count {old} vs {new}")]
    ResultCount { old: usize, new: usize },

    #[error("variadic status changed")]
    VariadicChanged,

    #[error("field is missing")]
    FieldMissing,

    #[error("method {name} is missing")]
    MethodMissing { name: String },

    #[error("method {name} has changed from value to pointer receiver")]
    ReceiverNarrowed { name: String },

    #[error("incompatible tag {key}:{old:?} vs {key}:{new:?}")]
    TagChanged {
        key: String,
        old: String,
        new: String,
    },
}

/// A single incompatibility, located by its path inside the compared type.
///
/// Paths read like expressions: `.Field`, `[]` for elements, `[key]` for map
/// keys, `(*p)` for pointer targets, `(<-c)` for channel elements and
/// `(param 0)` / `(result 0)` for function signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for Violation {}

/// Every violation found by one check, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no violations"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
        }
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::new(".Name", ViolationKind::FieldMissing);
        assert_eq!(v.to_string(), ".Name: field is missing");

        let root = Violation::new("", ViolationKind::MethodMissing { name: "Close".into() });
        assert_eq!(root.to_string(), "method Close is missing");
    }

    #[test]
    fn test_tag_message_quotes_values() {
        let v = ViolationKind::TagChanged {
            key: "json".into(),
            old: "id".into(),
            new: "".into(),
        };
        assert_eq!(v.to_string(), r#"incompatible tag json:"id" vs json:"""#);
    }

    #[test]
    fn test_summary_shows_first_and_count() {
        let one = Violations::new(vec![Violation::new(".A", ViolationKind::FieldMissing)]);
        assert_eq!(one.to_string(), ".A: field is missing");

        let three = Violations::new(vec![
            Violation::new(".A", ViolationKind::FieldMissing),
            Violation::new(".B", ViolationKind::FieldMissing),
            Violation::new("", ViolationKind::VariadicChanged),
        ]);
        assert_eq!(three.len(), 3);
        assert_eq!(three.to_string(), ".A: field is missing (and 2 more)");
    }
}
