use ja_core::{AccessOptions, AccessStep, JsonDocument, Mutator};
use serde_json::{json, Value};

#[test]
fn write_then_read_each_scalar() {
  let mut doc = JsonDocument::empty();
  assert!(doc.write_int("a.i", -7));
  assert!(doc.write_float("a.f", 2.5));
  assert!(doc.write_string("a.s", "hi"));
  assert!(doc.write_bool("a.b", true));

  assert_eq!(doc.read_int("a.i", 0), -7);
  assert_eq!(doc.read_float("a.f", 0.0), 2.5);
  assert_eq!(doc.read_string("a.s", ""), "hi");
  assert!(doc.read_bool("a.b", false));
}

#[test]
fn creates_intermediate_objects_and_padded_arrays() {
  let mut doc = JsonDocument::empty();
  assert!(doc.write_string("users[2].name", "cy"));
  assert_eq!(
    doc.as_value(),
    &json!({"users": [null, null, {"name": "cy"}]})
  );

  assert!(doc.write_int("grid[1][2]", 5));
  assert_eq!(doc.read_value("grid"), Some(&json!([null, [null, null, 5]])));
}

#[test]
fn arrays_grow_but_never_shrink() {
  let mut doc = JsonDocument::from_value(json!({"xs": [1, 2, 3, 4]}));
  assert!(doc.write_int("xs[1]", 20));
  assert_eq!(doc.read_value("xs"), Some(&json!([1, 20, 3, 4])));
  assert!(doc.write_int("xs[6]", 7));
  assert_eq!(doc.read_value("xs"), Some(&json!([1, 20, 3, 4, null, null, 7])));
}

#[test]
fn existing_siblings_are_preserved() {
  let mut doc = JsonDocument::from_string(r#"{"menu":{"id":"file","popup":{"menuitem":[{"value":"New"}]}}}"#).unwrap();
  assert!(doc.write_string("menu.popup.menuitem[0].onclick", "create()"));
  assert_eq!(doc.read_string("menu.id", ""), "file");
  assert_eq!(doc.read_string("menu.popup.menuitem[0].value", ""), "New");
  assert_eq!(doc.read_string("menu.popup.menuitem[0].onclick", ""), "create()");
}

#[test]
fn scalars_in_the_way_are_replaced() {
  let mut doc = JsonDocument::from_value(json!({"a": 1, "list": "nope"}));
  assert!(doc.write_int("a.b", 2));
  assert_eq!(doc.read_value("a"), Some(&json!({"b": 2})));

  assert!(doc.write_int("list[1]", 3));
  assert_eq!(doc.read_value("list"), Some(&json!([null, 3])));
}

#[test]
fn non_object_root_is_replaced() {
  let mut doc = JsonDocument::from_value(json!([1, 2]));
  assert!(doc.write_int("x", 1));
  assert_eq!(doc.as_value(), &json!({"x": 1}));
}

#[test]
fn invalid_paths_are_declined_without_changes() {
  let mut doc = JsonDocument::from_value(json!({"a": 1}));
  for bad in ["", "a..b", ".a", "a[", "a[x]", "1a", "[0]", "a[-1]"] {
    assert!(!doc.write_int(bad, 5), "{bad}");
    assert!(!doc.add_int_to_array(bad, 5), "{bad}");
  }
  assert_eq!(doc.as_value(), &json!({"a": 1}));
}

#[test]
fn whitespace_is_sanitized_before_writing() {
  let mut doc = JsonDocument::empty();
  assert!(doc.write_int(" a . b [ 1 ] ", 4));
  assert_eq!(doc.read_int("a.b[1]", 0), 4);
}

#[test]
fn non_finite_floats_are_declined() {
  let mut doc = JsonDocument::empty();
  assert!(!doc.write_float("x", f64::NAN));
  assert!(!doc.add_float_to_array("xs", f64::INFINITY));
  assert!(!doc.exists("x"));
  assert!(!doc.exists("xs"));
}

#[test]
fn append_keeps_call_order() {
  let mut doc = JsonDocument::empty();
  for i in 0..5 {
    assert!(doc.add_int_to_array("data.values", i));
  }
  assert_eq!(doc.array_size("data.values"), Some(5));
  assert_eq!(doc.read_value("data.values"), Some(&json!([0, 1, 2, 3, 4])));
}

#[test]
fn append_each_kind() {
  let mut doc = JsonDocument::empty();
  let item = JsonDocument::from_value(json!({"k": "v"}));
  assert!(doc.add_float_to_array("mixed", 1.5));
  assert!(doc.add_string_to_array("mixed", "s"));
  assert!(doc.add_bool_to_array("mixed", false));
  assert!(doc.add_object_to_array("mixed", &item));
  assert_eq!(doc.read_value("mixed"), Some(&json!([1.5, "s", false, {"k": "v"}])));
}

#[test]
fn append_replaces_non_array_target() {
  let mut doc = JsonDocument::from_value(json!({"tags": "solo"}));
  assert!(doc.add_string_to_array("tags", "x"));
  assert_eq!(doc.read_value("tags"), Some(&json!(["x"])));
}

#[test]
fn append_into_nested_array_slot() {
  let mut doc = JsonDocument::from_value(json!({"rows": [[1], [2]]}));
  assert!(doc.add_int_to_array("rows[1]", 3));
  assert_eq!(doc.read_value("rows"), Some(&json!([[1], [2, 3]])));
  assert!(doc.add_int_to_array("rows[3]", 9));
  assert_eq!(doc.read_value("rows"), Some(&json!([[1], [2, 3], null, [9]])));
}

#[test]
fn write_object_inserts_a_copy() {
  let mut doc = JsonDocument::empty();
  let mut sub = JsonDocument::empty();
  assert!(sub.write_int("n", 1));
  assert!(doc.write_object("child", &sub));
  assert!(sub.write_int("n", 2));
  assert_eq!(doc.read_int("child.n", 0), 1);
}

#[test]
fn case_insensitive_writes_reuse_the_existing_key() {
  let mut doc = JsonDocument::from_value(json!({"Name": "old"})).with_options(AccessOptions {
    case_sensitive: false,
    ..AccessOptions::default()
  });
  assert!(doc.write_string("name", "new"));
  assert_eq!(doc.as_value(), &json!({"Name": "new"}));
}

#[test]
fn mutator_step_api() {
  let m = Mutator::new(AccessOptions::default());
  let mut root = Value::Null;

  let steps = vec![AccessStep::field("a"), AccessStep::indexed("b", vec![1])];
  let leaf = m.ensure_path(&mut root, &steps).unwrap();
  leaf.insert("c".into(), json!(true));
  assert_eq!(root, json!({"a": {"b": [null, {"c": true}]}}));

  assert!(!m.set_value(&mut root, &[], json!(1)));
  assert!(m.set_value(&mut root, &[AccessStep::field("z")], json!(1)));
  assert!(m.append_value(&mut root, &[AccessStep::field("z")], json!(2)));
  assert_eq!(root["z"], json!([2]));
}

#[test]
fn oversized_index_is_declined() {
  let mut doc = JsonDocument::empty();
  assert!(!doc.write_int("xs[99999999999]", 1));
  assert_eq!(doc.as_value(), &json!({}));
}

#[test]
fn repeated_auto_create_is_idempotent() {
  let mut once = JsonDocument::empty();
  assert!(once.write_int("x.y.z", 1));

  let mut twice = JsonDocument::empty();
  assert!(twice.write_int("x.y.z", 1));
  assert!(twice.write_int("x.y.z", 1));
  assert_eq!(twice, once);

  let mut padded = JsonDocument::empty();
  assert!(padded.write_int("a[2].b", 1));
  let first = padded.clone();
  assert!(padded.write_int("a[2].b", 1));
  assert_eq!(padded, first);
}
