//! Type, field and method nodes

use crate::tag::parse_tags;
use crate::{Kind, TypeName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in a type graph.
///
/// A named type appears either as a full definition or as a stub: name set,
/// kind `Unknown`, everything else empty. Stubs are resolved through
/// [`Info::deref`](crate::Info::deref), which is what lets recursive types be
/// written down as finite trees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Type {
    #[serde(default, skip_serializing_if = "TypeName::is_empty")]
    pub name: TypeName,

    #[serde(default, skip_serializing_if = "Kind::is_unknown")]
    pub kind: Kind,

    /// Methods declared on the type, keyed by method name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub methods: BTreeMap<String, Method>,

    /// Struct fields in declaration order; only for `Kind::Struct`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    /// Element type; only for array, chan, map, ptr and slice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<Box<Type>>,

    /// Key type; only for `Kind::Map`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<Type>>,

    /// Input parameters; only for `Kind::Func`
    #[serde(rename = "In", default, skip_serializing_if = "Vec::is_empty")]
    pub ins: Vec<Type>,

    /// Results; only for `Kind::Func`
    #[serde(rename = "Out", default, skip_serializing_if = "Vec::is_empty")]
    pub outs: Vec<Type>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub variadic: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Type {
    /// An unnamed type of the given kind with no substructure
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A reference to a named type defined elsewhere in the graph
    pub fn stub(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<TypeName>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn ptr(elem: Type) -> Self {
        Self::with_elem(Kind::Ptr, elem)
    }

    pub fn slice(elem: Type) -> Self {
        Self::with_elem(Kind::Slice, elem)
    }

    pub fn array(elem: Type) -> Self {
        Self::with_elem(Kind::Array, elem)
    }

    pub fn chan(elem: Type) -> Self {
        Self::with_elem(Kind::Chan, elem)
    }

    pub fn map(key: Type, elem: Type) -> Self {
        Self {
            key: Some(Box::new(key)),
            ..Self::with_elem(Kind::Map, elem)
        }
    }

    pub fn func(ins: Vec<Type>, outs: Vec<Type>, variadic: bool) -> Self {
        Self {
            kind: Kind::Func,
            ins,
            outs,
            variadic,
            ..Self::default()
        }
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        Self {
            kind: Kind::Struct,
            fields,
            ..Self::default()
        }
    }

    fn with_elem(kind: Kind, elem: Type) -> Self {
        Self {
            kind,
            elem: Some(Box::new(elem)),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<TypeName>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    /// Whether this node is a bare name reference awaiting resolution
    pub fn is_stub(&self) -> bool {
        !self.name.is_empty()
            && self.kind.is_unknown()
            && self.methods.is_empty()
            && self.fields.is_empty()
            && self.elem.is_none()
            && self.key.is_none()
            && self.ins.is_empty()
            && self.outs.is_empty()
            && !self.variadic
    }

    /// Find a field by exact name. Embedded fields are not searched.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Every type node directly below this one, stubs included
    pub fn children(&self) -> impl Iterator<Item = &Type> {
        self.elem
            .as_deref()
            .into_iter()
            .chain(self.key.as_deref())
            .chain(self.ins.iter())
            .chain(self.outs.iter())
            .chain(self.fields.iter().map(|f| &f.ty))
            .chain(self.methods.values().map(|m| &m.ty))
    }
}

/// A struct field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    pub name: String,

    #[serde(rename = "Type")]
    pub ty: Type,

    /// Set for embedded fields
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,

    /// Raw annotation string, e.g. `json:"id,omitempty" xml:"id"`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            anonymous: false,
            tag: String::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn embedded(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// All `key:"value"` annotations in the tag
    pub fn tags(&self) -> BTreeMap<String, String> {
        parse_tags(&self.tag)
    }

    pub fn tag_lookup(&self, key: &str) -> Option<String> {
        self.tags().remove(key)
    }
}

/// A method declared on a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Method {
    /// Only callable through a pointer receiver
    #[serde(default)]
    pub ptr_receiver: bool,

    pub name: String,

    /// Function type of the method with the receiver stripped
    #[serde(rename = "Type")]
    pub ty: Type,
}

impl Method {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            ptr_receiver: false,
            name: name.into(),
            ty,
        }
    }

    pub fn ptr_receiver(mut self) -> Self {
        self.ptr_receiver = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stub_shape() {
        assert!(Type::stub("pkg#T").is_stub());
        assert!(!Type::named("pkg#T", Kind::Struct).is_stub());
        assert!(!Type::new(Kind::Int).is_stub());
    }

    #[test]
    fn test_field_by_name_skips_embedded_members() {
        let inner = Type::structure(vec![Field::new("Hidden", Type::new(Kind::Int))]);
        let outer = Type::structure(vec![
            Field::new("Inner", inner).embedded(),
            Field::new("Visible", Type::new(Kind::String)),
        ]);

        assert!(outer.field_by_name("Visible").is_some());
        assert!(outer.field_by_name("Inner").is_some());
        assert!(outer.field_by_name("Hidden").is_none());
    }

    #[test]
    fn test_stub_serializes_to_name_only() {
        let json = serde_json::to_string(&Type::stub("pkg#T")).unwrap();
        assert_eq!(json, r#"{"Name":"pkg#T"}"#);
    }

    #[test]
    fn test_deserialize_extractor_output() {
        let json = r#"{
            "Name": "pkg#Point",
            "Kind": "struct",
            "Methods": {
                "String": {"PtrReceiver": false, "Name": "String",
                           "Type": {"Kind": "func", "Out": [{"Kind": "string"}]}}
            },
            "Fields": [
                {"Name": "X", "Type": {"Kind": "int"}, "Tag": "json:\"x\""},
                {"Name": "Next", "Type": {"Kind": "ptr", "Elem": {"Name": "pkg#Point"}}}
            ]
        }"#;
        let ty: Type = serde_json::from_str(json).unwrap();

        assert_eq!(ty.kind, Kind::Struct);
        assert_eq!(ty.fields.len(), 2);
        assert_eq!(ty.fields[0].tag_lookup("json").as_deref(), Some("x"));
        let next = ty.field_by_name("Next").unwrap();
        assert!(next.ty.elem.as_ref().unwrap().is_stub());
        assert_eq!(ty.method("String").unwrap().ty.outs.len(), 1);
    }

    #[test]
    fn test_children_visits_every_edge() {
        let ty = Type::named("pkg#S", Kind::Struct)
            .with_field(Field::new("A", Type::new(Kind::Int)))
            .with_method(Method::new("M", Type::func(vec![], vec![], false)));
        assert_eq!(ty.children().count(), 2);

        let map = Type::map(Type::new(Kind::String), Type::stub("pkg#S"));
        let kinds: Vec<_> = map.children().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![Kind::Unknown, Kind::String]);
    }
}
