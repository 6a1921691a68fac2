//! apicompat - structural backward-compatibility checking for API type surfaces
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use apicompat_checker as checker;
pub use apicompat_types as types;

pub use apicompat_checker::{check, check_graphs, CheckError, GraphReport, Violation, ViolationKind, Violations};
pub use apicompat_types::{Field, GraphError, Info, Kind, Method, Type, TypeName};
