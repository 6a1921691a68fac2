//! apicompat-checker: backward-compatibility checking for type graphs
//!
//! Compares a type from an old graph against its counterpart in a new graph
//! and reports every change that could break existing users: removed fields
//! and methods, changed signatures, changed tag values, kind changes and
//! receivers narrowed from value to pointer. Additions are always compatible.

mod checker;
mod report;
mod violation;

pub use checker::Checker;
pub use report::{check_graphs, GraphReport};
pub use violation::{Violation, ViolationKind, Violations};

use apicompat_types::{GraphError, Info, Type};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The new type breaks the old one
    #[error("{0}")]
    Incompatible(Violations),

    /// One of the graphs is malformed; the comparison was abandoned
    #[error("graph inconsistency: {0}")]
    Graph(#[from] GraphError),
}

impl CheckError {
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            CheckError::Incompatible(v) => Some(v),
            CheckError::Graph(_) => None,
        }
    }
}

/// Check that `root_new` (from `new`) is backwards compatible with
/// `root_old` (from `old`).
///
/// Any type for which `ignore` returns true, in either graph, is treated as
/// compatible without looking inside it.
pub fn check<F>(old: &Info, new: &Info, root_old: &Type, root_new: &Type, ignore: F) -> Result<(), CheckError>
where
    F: Fn(&Info, &Type) -> bool,
{
    tracing::debug!(old = %root_old.name, new = %root_new.name, "checking type");
    let violations = Checker::new(old, new, ignore).run(root_old, root_new)?;
    tracing::debug!(
        old = %root_old.name,
        new = %root_new.name,
        violations = violations.len(),
        "checked type"
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Incompatible(Violations::new(violations)))
    }
}

/// An ignore predicate that never matches
pub fn never_ignore(_: &Info, _: &Type) -> bool {
    false
}
