//! Type graph: the name-keyed set of type definitions for one API version

use crate::{GraphError, Method, Type, TypeName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

/// All named type definitions describing one version of an API surface.
///
/// Definitions own their anonymous subtypes; references to other named
/// types are stubs looked up here by name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Info {
    #[serde(default)]
    pub types: BTreeMap<TypeName, Type>,
}

impl Info {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a graph document
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register a full named definition, returning error if duplicate
    pub fn insert(&mut self, ty: Type) -> Result<&Type, GraphError> {
        if ty.name.is_empty() {
            return Err(GraphError::Unnamed { kind: ty.kind });
        }
        if self.types.contains_key(&ty.name) {
            return Err(GraphError::DuplicateName { name: ty.name });
        }

        let name = ty.name.clone();
        Ok(self.types.entry(name).or_insert(ty))
    }

    pub fn get(&self, name: &TypeName) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// Iterate over all definitions in name order
    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a possibly stubbed type to its full definition.
    ///
    /// Named types resolve to their registered definition. An unregistered
    /// type that already has a kind is returned as is. A stub with nothing
    /// registered under its name means the graph is malformed.
    pub fn deref<'a>(&'a self, ty: &'a Type) -> Result<&'a Type, GraphError> {
        if let Some(def) = self.types.get(&ty.name) {
            return Ok(def);
        }
        if !ty.kind.is_unknown() {
            return Ok(ty);
        }
        Err(GraphError::UnresolvedStub {
            name: ty.name.clone(),
        })
    }

    /// Delete every method that does not satisfy `keep`, which is called
    /// for every method on every registered type.
    pub fn prune_methods<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Type, &Method) -> bool,
    {
        let mut pruned = 0usize;
        for ty in self.types.values_mut() {
            let doomed: Vec<String> = {
                let view: &Type = ty;
                view.methods
                    .iter()
                    .filter(|&(_, m)| !keep(view, m))
                    .map(|(name, _)| name.clone())
                    .collect()
            };
            pruned += doomed.len();
            for name in doomed {
                ty.methods.remove(&name);
            }
        }
        tracing::debug!(pruned, "pruned methods");
    }

    /// Check that every stub reachable from the graph resolves.
    ///
    /// Returns one error per distinct unresolved name.
    pub fn validate(&self) -> Result<(), Vec<GraphError>> {
        let mut missing = BTreeSet::new();
        for ty in self.types.values() {
            self.collect_unresolved(ty, &mut missing);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing
                .into_iter()
                .map(|name| GraphError::UnresolvedStub { name })
                .collect())
        }
    }

    fn collect_unresolved(&self, ty: &Type, missing: &mut BTreeSet<TypeName>) {
        for child in ty.children() {
            if child.kind.is_unknown() {
                if !self.types.contains_key(&child.name) {
                    missing.insert(child.name.clone());
                }
                continue;
            }
            self.collect_unresolved(child, missing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Kind};

    fn linked_list() -> Info {
        let mut info = Info::new();
        info.insert(
            Type::named("list#Node", Kind::Struct)
                .with_field(Field::new("Value", Type::new(Kind::Int)))
                .with_field(Field::new("Next", Type::ptr(Type::stub("list#Node"))))
                .with_method(Method::new("Len", Type::func(vec![], vec![Type::new(Kind::Int)], false)))
                .with_method(Method::new("MarshalJSON", Type::func(vec![], vec![], false))),
        )
        .unwrap();
        info
    }

    #[test]
    fn test_deref_resolves_stub() {
        let info = linked_list();
        let stub = Type::stub("list#Node");
        let def = info.deref(&stub).unwrap();
        assert_eq!(def.kind, Kind::Struct);
        assert!(std::ptr::eq(def, info.get(&"list#Node".into()).unwrap()));
    }

    #[test]
    fn test_deref_returns_anonymous_type_unchanged() {
        let info = Info::new();
        let ty = Type::slice(Type::new(Kind::String));
        assert!(std::ptr::eq(info.deref(&ty).unwrap(), &ty));
    }

    #[test]
    fn test_deref_unresolved_stub_is_graph_error() {
        let info = Info::new();
        let err = info.deref(&Type::stub("gone#T")).unwrap_err();
        assert!(matches!(err, GraphError::UnresolvedStub { ref name } if name.as_str() == "gone#T"));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_unnamed() {
        let mut info = linked_list();
        assert!(matches!(
            info.insert(Type::named("list#Node", Kind::Int)),
            Err(GraphError::DuplicateName { .. })
        ));
        assert!(matches!(
            info.insert(Type::new(Kind::Int)),
            Err(GraphError::Unnamed { kind: Kind::Int })
        ));
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn test_prune_methods() {
        let mut info = linked_list();
        info.prune_methods(|_, m| m.name.starts_with("Marshal"));
        let node = info.get(&"list#Node".into()).unwrap();
        assert!(node.method("MarshalJSON").is_some());
        assert!(node.method("Len").is_none());
    }

    #[test]
    fn test_prune_predicate_sees_whole_type() {
        let mut info = linked_list();
        let mut seen = Vec::new();
        info.prune_methods(|t, m| {
            seen.push((t.methods.len(), m.name.clone()));
            true
        });
        assert_eq!(seen, vec![(2, "Len".to_string()), (2, "MarshalJSON".to_string())]);
    }

    #[test]
    fn test_validate() {
        let mut info = linked_list();
        assert!(info.validate().is_ok());

        info.insert(
            Type::named("list#Holder", Kind::Struct)
                .with_field(Field::new("A", Type::map(Type::stub("x#Key"), Type::stub("x#Val"))))
                .with_field(Field::new("B", Type::slice(Type::stub("x#Val")))),
        )
        .unwrap();
        let errors = info.validate().unwrap_err();
        let names: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "unresolved type reference: x#Key",
                "unresolved type reference: x#Val",
            ]
        );
    }

    #[test]
    fn test_json_round_trip_keeps_stubs() {
        let info = linked_list();
        let json = info.to_json_pretty().unwrap();
        assert!(json.contains("\"Types\""));
        let back = Info::from_json(&json).unwrap();
        assert_eq!(back, info);
        let node = back.get(&"list#Node".into()).unwrap();
        let next = node.field_by_name("Next").unwrap();
        assert!(next.ty.elem.as_ref().unwrap().is_stub());
    }
}
