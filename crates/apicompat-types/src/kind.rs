//! Structural categories of types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural category of a type.
///
/// `Unknown` only ever appears on stub references, which carry a name and
/// nothing else until they are resolved against their graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Unknown,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Array,
    Chan,
    Func,
    Interface,
    Map,
    Ptr,
    Slice,
    Struct,
    UnsafePointer,
}

impl Kind {
    /// The wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Chan => "chan",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Map => "map",
            Kind::Ptr => "ptr",
            Kind::Slice => "slice",
            Kind::Struct => "struct",
            Kind::UnsafePointer => "unsafepointer",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Kind::Unknown)
    }

    /// Primitive kinds carry no substructure
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Uintptr
                | Kind::Float32
                | Kind::Float64
                | Kind::Complex64
                | Kind::Complex128
                | Kind::String
        )
    }

    /// Whether `Type::elem` is meaningful for this kind
    pub fn has_elem(&self) -> bool {
        matches!(
            self,
            Kind::Array | Kind::Chan | Kind::Map | Kind::Ptr | Kind::Slice
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
