//! Whole-graph comparison

use std::collections::BTreeMap;
use std::fmt;

use apicompat_types::{GraphError, Info, Type, TypeName};

use crate::{check, CheckError, Violations};

/// Findings for every named type of an old graph
#[derive(Debug, Default)]
pub struct GraphReport {
    /// Old types with no definition in the new graph
    pub removed: Vec<TypeName>,
    /// Old types whose new definition breaks them
    pub incompatible: BTreeMap<TypeName, Violations>,
    /// Number of types compared
    pub checked: usize,
}

impl GraphReport {
    pub fn is_compatible(&self) -> bool {
        self.removed.is_empty() && self.incompatible.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.incompatible.values().map(Violations::len).sum()
    }

    /// One human-readable line per finding
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .removed
            .iter()
            .map(|name| format!("type {} has gone away", name))
            .collect();
        for (name, violations) in &self.incompatible {
            for violation in violations {
                lines.push(format!("{} incompatible: {}", name, violation));
            }
        }
        lines
    }
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Check every named type of `old` against the same-named type of `new`.
///
/// Each type gets its own comparison. Stops at the first malformed graph.
pub fn check_graphs<F>(old: &Info, new: &Info, ignore: F) -> Result<GraphReport, GraphError>
where
    F: Fn(&Info, &Type) -> bool,
{
    let mut report = GraphReport::default();

    for t0 in old.iter() {
        let Some(t1) = new.get(&t0.name) else {
            report.removed.push(t0.name.clone());
            continue;
        };
        report.checked += 1;

        match check(old, new, t0, t1, &ignore) {
            Ok(()) => {}
            Err(CheckError::Incompatible(violations)) => {
                report.incompatible.insert(t0.name.clone(), violations);
            }
            Err(CheckError::Graph(err)) => return Err(err),
        }
    }

    tracing::debug!(
        checked = report.checked,
        removed = report.removed.len(),
        incompatible = report.incompatible.len(),
        "checked graphs"
    );
    Ok(report)
}
