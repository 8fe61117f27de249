use ja_core::{kind_of, read_scalar, AccessOptions, JsonDocument, JsonValueKind, ScalarPolicy};
use serde_json::{json, Value};

fn sample() -> Value {
  json!({
    "int": 42,
    "neg_float": -2.9,
    "float": 2.9,
    "big": 18446744073709551615u64,
    "text": "hello",
    "num_text": "42",
    "float_text": "3.5",
    "bool_text": "TRUE",
    "empty_text": "",
    "flag": true,
    "nothing": null,
    "obj": {"a": 1},
    "arr": [1]
  })
}

fn strict() -> JsonDocument {
  JsonDocument::from_value(sample())
}

fn lenient() -> JsonDocument {
  JsonDocument::from_value(sample()).with_options(AccessOptions {
    scalar_policy: ScalarPolicy::Lenient,
    ..AccessOptions::default()
  })
}

#[test]
fn strict_matches_types_exactly() {
  let doc = strict();
  assert_eq!(doc.read_int("int", 0), 42);
  assert_eq!(doc.read_float("int", 0.0), 42.0);
  assert_eq!(doc.read_string("text", ""), "hello");
  assert!(doc.read_bool("flag", false));

  assert_eq!(doc.read_int("num_text", -1), -1);
  assert_eq!(doc.read_float("float_text", -1.0), -1.0);
  assert!(!doc.read_bool("bool_text", false));
  assert_eq!(doc.read_string("int", "d"), "d");
  assert_eq!(doc.read_string("empty_text", "d"), "");
}

#[test]
fn float_to_int_truncates_toward_zero() {
  let doc = strict();
  assert_eq!(doc.read_int("float", 0), 2);
  assert_eq!(doc.read_int("neg_float", 0), -2);
  assert_eq!(doc.read_int("big", 0), i64::MAX);
}

#[test]
fn null_containers_and_missing_give_default() {
  for doc in [strict(), lenient()] {
    assert_eq!(doc.read_int("nothing", 7), 7);
    assert_eq!(doc.read_int("obj", 7), 7);
    assert_eq!(doc.read_string("arr", "d"), "d");
    assert!(doc.read_bool("missing", true));
  }
}

#[test]
fn lenient_parses_strings() {
  let doc = lenient();
  assert_eq!(doc.read_int("num_text", 0), 42);
  assert_eq!(doc.read_int("float_text", -1), -1);
  assert_eq!(doc.read_float("float_text", 0.0), 3.5);
  assert_eq!(doc.read_float("num_text", 0.0), 42.0);
  assert!(doc.read_bool("bool_text", false));
  assert_eq!(doc.read_int("text", -1), -1);
}

#[test]
fn lenient_renders_numbers_and_bools_as_text() {
  let doc = lenient();
  assert_eq!(doc.read_string("int", ""), "42");
  assert_eq!(doc.read_string("flag", ""), "true");
}

#[test]
fn lenient_empty_string_is_default() {
  let doc = lenient();
  assert_eq!(doc.read_string("empty_text", "d"), "d");
  assert_eq!(doc.read_int("empty_text", 5), 5);
  assert!(doc.read_bool("empty_text", true));
}

#[test]
fn read_scalar_directly() {
  assert_eq!(read_scalar(Some(&json!("7")), 0i64, ScalarPolicy::Lenient), 7);
  assert_eq!(read_scalar(Some(&json!("7")), 0i64, ScalarPolicy::Strict), 0);
  assert_eq!(read_scalar::<f64>(None, 1.5, ScalarPolicy::Strict), 1.5);
}

#[test]
fn value_kinds() {
  let v = sample();
  assert_eq!(kind_of(&v), JsonValueKind::Object);
  assert_eq!(kind_of(&v["arr"]), JsonValueKind::Array);
  assert_eq!(kind_of(&v["nothing"]), JsonValueKind::Null);
  assert_eq!(strict().value_kind("float"), Some(JsonValueKind::Number));
  assert_eq!(strict().value_kind("flag"), Some(JsonValueKind::Bool));
  assert_eq!(strict().value_kind("text"), Some(JsonValueKind::String));
  assert_eq!(strict().value_kind("missing"), None);
}
