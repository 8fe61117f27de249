use ja_core::{AccessOptions, DebugLevel, JsonDocument};
use serde_json::json;

fn legacy(v: serde_json::Value) -> JsonDocument {
  JsonDocument::from_value(v).with_options(AccessOptions::legacy())
}

#[test]
fn legacy_defaults() {
  let opts = AccessOptions::legacy();
  assert!(!opts.case_sensitive);
  assert_eq!(opts.debug_level, DebugLevel::None);
}

#[test]
fn attribute_prefers_at_key_then_scalar_field() {
  let doc = legacy(json!({
    "node": {"@id": "attr", "id": "field", "kind": "scalar", "child": {"x": 1}}
  }));
  assert_eq!(doc.read_string("node.@id", ""), "attr");
  assert_eq!(doc.read_string("node.@kind", ""), "scalar");
  // Containers are not attributes.
  assert!(!doc.exists("node.@child"));
  assert!(!doc.exists("node.@missing"));
}

#[test]
fn attribute_ends_the_walk() {
  let doc = legacy(json!({"node": {"@id": "attr"}}));
  assert_eq!(doc.read_string("node.@id.whatever", ""), "attr");
}

#[test]
fn missing_final_field_falls_back_to_at_key() {
  let doc = legacy(json!({"node": {"@version": "2"}}));
  assert_eq!(doc.read_int("node.version", 0), 2);

  // Only under the legacy grammar.
  let advanced = JsonDocument::from_value(json!({"node": {"@version": "2"}}));
  assert!(!advanced.exists("node.version"));
}

#[test]
fn single_trailing_index_and_case_folding() {
  let doc = legacy(json!({"Items": [{"Name": "a"}, {"Name": "b"}]}));
  assert_eq!(doc.read_string("items[1].name", ""), "b");
  assert_eq!(doc.read_objects("ITEMS").map(|v| v.len()), Some(2));
}

#[test]
fn legacy_coerces_strings() {
  let doc = legacy(json!({"n": "12", "f": "1.25", "b": "False"}));
  assert_eq!(doc.read_int("n", 0), 12);
  assert_eq!(doc.read_float("f", 0.0), 1.25);
  assert!(!doc.read_bool("b", true));
}

#[test]
fn attribute_paths_are_not_writable() {
  let mut doc = legacy(json!({"node": {}}));
  assert!(!doc.write_string("node.@id", "x"));
  assert_eq!(doc.as_value(), &json!({"node": {}}));
}

#[test]
fn debug_levels_do_not_change_results() {
  let mut doc = JsonDocument::from_value(json!({"a": [1, 2]})).with_options(AccessOptions {
    debug_level: DebugLevel::Verbose,
    ..AccessOptions::default()
  });
  assert_eq!(doc.read_int("a[1]", 0), 2);
  assert_eq!(doc.read_int("a[5]", -1), -1);
  assert!(doc.add_int_to_array("a", 3));
  assert!(!doc.write_int("a..b", 1));
  assert_eq!(doc.array_size("a"), Some(3));
}

#[test]
fn legacy_writes_read_back_through_the_legacy_grammar() {
  let mut doc = legacy(json!({}));
  assert!(doc.write_int("items[1].count", 4));
  assert_eq!(doc.read_int("items[1].count", -1), 4);

  // One index per segment: a multi-index write is declined and leaves the tree alone.
  assert!(!doc.write_int("m[0][1]", 7));
  assert!(!doc.add_int_to_array("m[0][1]", 7));
  assert_eq!(doc.read_int("m[0][1]", -1), -1);
  assert!(!doc.exists("m"));
}
