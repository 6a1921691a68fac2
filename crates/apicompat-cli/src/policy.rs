//! Default comparison policy: only the marshaling surface matters
//!
//! Types that marshal themselves are opaque to a structural comparison, so
//! they are ignored, and every other method is irrelevant to the encoded
//! form, so it is pruned before comparing.

use apicompat_types::{Info, Method, Type};

pub const MARSHAL_METHODS: &[&str] = &["MarshalJSON", "UnmarshalJSON", "MarshalText", "UnmarshalText"];

/// Keep predicate for `Info::prune_methods`
pub fn is_marshal_method(_: &Type, method: &Method) -> bool {
    MARSHAL_METHODS.contains(&method.name.as_str())
}

/// Ignore predicate for `check`: the type controls its own encoding
pub fn has_custom_marshaler(_: &Info, ty: &Type) -> bool {
    MARSHAL_METHODS.iter().any(|name| ty.methods.contains_key(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_types::Kind;

    fn method(name: &str) -> Method {
        Method::new(name, Type::func(vec![], vec![], false))
    }

    #[test]
    fn test_prune_keeps_only_marshalers() {
        let mut info = Info::new();
        info.insert(
            Type::named("p#T", Kind::Struct)
                .with_method(method("MarshalJSON"))
                .with_method(method("String"))
                .with_method(method("UnmarshalText").ptr_receiver()),
        )
        .unwrap();

        info.prune_methods(is_marshal_method);

        let t = info.get(&"p#T".into()).unwrap();
        let names: Vec<_> = t.methods.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["MarshalJSON", "UnmarshalText"]);
    }

    #[test]
    fn test_custom_marshaler_detection() {
        let info = Info::new();
        assert!(has_custom_marshaler(&info, &Type::named("p#T", Kind::Struct).with_method(method("MarshalText"))));
        assert!(!has_custom_marshaler(&info, &Type::named("p#T", Kind::Struct).with_method(method("String"))));
    }
}
