//! apicompat-types: the type graph model
//!
//! A type graph ([`Info`]) holds every named type definition of one version
//! of an API surface. Definitions own their anonymous subtypes and refer to
//! other named types through stubs, so recursive types stay finite:
//!
//! ```
//! use apicompat_types::{Field, Info, Kind, Type};
//!
//! let mut info = Info::new();
//! info.insert(
//!     Type::named("list#Node", Kind::Struct)
//!         .with_field(Field::new("Next", Type::ptr(Type::stub("list#Node")))),
//! )
//! .unwrap();
//!
//! let next = &info.get(&"list#Node".into()).unwrap().fields[0].ty;
//! let target = info.deref(next.elem.as_deref().unwrap()).unwrap();
//! assert_eq!(target.kind, Kind::Struct);
//! ```

mod error;
mod info;
mod kind;
mod name;
mod tag;
mod ty;

pub use error::GraphError;
pub use info::Info;
pub use kind::Kind;
pub use name::{TypeName, NAME_SEPARATOR};
pub use tag::{parse_tags, unquote};
pub use ty::{Field, Method, Type};
