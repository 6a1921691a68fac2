use std::fs;
use std::path::{Path, PathBuf};

use apicompat::Info;

/// Get path to a graph fixture in tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.json", name))
}

/// Load a graph fixture, failing the test if it is missing or malformed
pub fn load_graph(name: &str) -> Info {
    let path = fixture_path(name);
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e));
    let info = Info::from_json(&source)
        .unwrap_or_else(|e| panic!("Failed to decode fixture {}: {}", name, e));
    if let Err(errors) = info.validate() {
        panic!("Fixture {} has unresolved types: {:?}", name, errors);
    }
    info
}

/// Method names the default policy keeps
pub const MARSHAL_METHODS: &[&str] = &["MarshalJSON", "UnmarshalJSON", "MarshalText", "UnmarshalText"];

/// Drop every method that does not affect the encoded form
pub fn prune_to_marshalers(info: &mut Info) {
    info.prune_methods(|_, m| MARSHAL_METHODS.contains(&m.name.as_str()));
}

/// Ignore types that marshal themselves
pub fn custom_marshaler(_: &Info, t: &apicompat::Type) -> bool {
    MARSHAL_METHODS.iter().any(|name| t.methods.contains_key(*name))
}
