use serde_json::{Map, Number, Value};

use crate::{
  access::{navigate::index_into, Mutator, Navigator},
  debug::DebugTrace,
  engine::CoreError,
  models::{AccessOptions, AccessSegment, AccessStep, JsonValueKind},
  value::{kind_of, read_scalar, ScalarRead},
};

const READ_HINT: &str = "check field names, index bounds and that intermediate nodes are objects";

/// An owned JSON tree addressed by access strings.
///
/// Reads never fail: a path that does not resolve gives the caller's default (or `None`).
/// Writes return `false` when the path is rejected.
#[derive(Debug, Clone)]
pub struct JsonDocument {
  root: Value,
  opts: AccessOptions,
}

impl Default for JsonDocument {
  fn default() -> Self {
    Self::empty()
  }
}

impl PartialEq for JsonDocument {
  fn eq(&self, other: &Self) -> bool {
    self.root == other.root
  }
}

impl JsonDocument {
  pub fn empty() -> Self {
    Self::from_value(Value::Object(Map::new()))
  }

  pub fn from_value(root: Value) -> Self {
    Self {
      root,
      opts: AccessOptions::default(),
    }
  }

  /// Parse `text`; the top-level value must be an object.
  pub fn from_string(text: &str) -> Result<Self, CoreError> {
    if text.trim().is_empty() {
      return Err(CoreError::EmptyInput);
    }
    let root: Value = serde_json::from_str(text).map_err(|e| CoreError::InvalidJson(e.to_string()))?;
    if !root.is_object() {
      return Err(CoreError::NotAnObject(kind_of(&root)));
    }
    Ok(Self::from_value(root))
  }

  pub fn with_options(mut self, opts: AccessOptions) -> Self {
    self.opts = opts;
    self
  }

  pub fn options(&self) -> AccessOptions {
    self.opts
  }

  pub fn set_options(&mut self, opts: AccessOptions) {
    self.opts = opts;
  }

  pub fn as_value(&self) -> &Value {
    &self.root
  }

  pub fn into_value(self) -> Value {
    self.root
  }

  pub fn to_string(&self, pretty: bool) -> String {
    if pretty {
      format!("{:#}", self.root)
    } else {
      self.root.to_string()
    }
  }

  fn navigator(&self) -> Navigator {
    Navigator::new(self.opts)
  }

  fn mutator(&self) -> Mutator {
    Mutator::new(self.opts)
  }

  fn trace(&self) -> DebugTrace {
    DebugTrace::new(self.opts.debug_level)
  }

  fn child(&self, v: &Value) -> JsonDocument {
    Self {
      root: v.clone(),
      opts: self.opts,
    }
  }

  // ---- reads ----

  /// The node at `path`. An empty path is the root.
  pub fn read_value(&self, path: &str) -> Option<&Value> {
    let trace = self.trace();
    let _scope = trace.scope("read", path);
    let nav = self.navigator();
    let found = nav.resolve(&self.root, &nav.parse(path));
    match found {
      Some(v) => trace.success("read", format_args!("'{path}' -> {:?}", kind_of(v))),
      None => trace.failure(path, "path_not_found", READ_HINT),
    }
    found
  }

  pub fn value_kind(&self, path: &str) -> Option<JsonValueKind> {
    self.read_value(path).map(kind_of)
  }

  pub fn exists(&self, path: &str) -> bool {
    self.read_value(path).is_some()
  }

  pub fn read<T: ScalarRead>(&self, path: &str, default: T) -> T {
    read_scalar(self.read_value(path), default, self.opts.scalar_policy)
  }

  pub fn read_int(&self, path: &str, default: i64) -> i64 {
    self.read(path, default)
  }

  pub fn read_float(&self, path: &str, default: f64) -> f64 {
    self.read(path, default)
  }

  pub fn read_string(&self, path: &str, default: &str) -> String {
    self.read(path, default.to_string())
  }

  pub fn read_bool(&self, path: &str, default: bool) -> bool {
    self.read(path, default)
  }

  /// Copy of the node at `path` as a standalone document.
  pub fn read_object(&self, path: &str) -> Option<JsonDocument> {
    self.read_value(path).map(|v| self.child(v))
  }

  /// Every element of the array at `path` (or the single node there). `None` when nothing
  /// resolves or the array is empty.
  pub fn read_objects(&self, path: &str) -> Option<Vec<JsonDocument>> {
    let trace = self.trace();
    let nav = self.navigator();
    match nav.resolve_all(&self.root, &nav.parse(path)) {
      Some(found) => {
        trace.success("read_objects", format_args!("'{path}' -> {} nodes", found.len()));
        Some(found.into_iter().map(|v| self.child(v)).collect())
      }
      None => {
        trace.failure(path, "path_not_found", READ_HINT);
        None
      }
    }
  }

  // ---- writes ----

  pub fn write_value(&mut self, path: &str, value: Value) -> bool {
    self.mutator().write(&mut self.root, path, value)
  }

  pub fn write_int(&mut self, path: &str, value: i64) -> bool {
    self.write_value(path, Value::from(value))
  }

  /// Non-finite floats have no JSON form and are declined.
  pub fn write_float(&mut self, path: &str, value: f64) -> bool {
    match self.float_value(path, value) {
      Some(v) => self.write_value(path, v),
      None => false,
    }
  }

  pub fn write_string(&mut self, path: &str, value: &str) -> bool {
    self.write_value(path, Value::from(value))
  }

  pub fn write_bool(&mut self, path: &str, value: bool) -> bool {
    self.write_value(path, Value::Bool(value))
  }

  pub fn write_object(&mut self, path: &str, value: &JsonDocument) -> bool {
    self.write_value(path, value.root.clone())
  }

  // ---- appends ----

  pub fn add_value_to_array(&mut self, path: &str, value: Value) -> bool {
    self.mutator().append(&mut self.root, path, value)
  }

  pub fn add_int_to_array(&mut self, path: &str, value: i64) -> bool {
    self.add_value_to_array(path, Value::from(value))
  }

  pub fn add_float_to_array(&mut self, path: &str, value: f64) -> bool {
    match self.float_value(path, value) {
      Some(v) => self.add_value_to_array(path, v),
      None => false,
    }
  }

  pub fn add_string_to_array(&mut self, path: &str, value: &str) -> bool {
    self.add_value_to_array(path, Value::from(value))
  }

  pub fn add_bool_to_array(&mut self, path: &str, value: bool) -> bool {
    self.add_value_to_array(path, Value::Bool(value))
  }

  pub fn add_object_to_array(&mut self, path: &str, value: &JsonDocument) -> bool {
    self.add_value_to_array(path, value.root.clone())
  }

  fn float_value(&self, path: &str, value: f64) -> Option<Value> {
    let n = Number::from_f64(value);
    if n.is_none() {
      self.trace().failure(path, "non_finite_float", "NaN and infinities cannot be stored in JSON");
    }
    n.map(Value::Number)
  }

  // ---- arrays ----

  pub fn is_array(&self, path: &str) -> bool {
    self.read_value(path).is_some_and(Value::is_array)
  }

  pub fn array_size(&self, path: &str) -> Option<usize> {
    self.read_value(path)?.as_array().map(Vec::len)
  }

  pub fn safe_read_array_element(&self, path: &str, index: usize) -> Option<&Value> {
    self.read_value(path)?.as_array()?.get(index)
  }

  /// Elements of the array at `path`; empty when it is missing or not an array.
  pub fn read_array_values(&self, path: &str) -> Vec<&Value> {
    self
      .read_value(path)
      .and_then(Value::as_array)
      .map(|items| items.iter().collect())
      .unwrap_or_default()
  }

  /// Nesting depth of the array named by `path`, following first elements.
  ///
  /// Indices on the final step are ignored, so `matrix[0][0]` reports the depth of `matrix`.
  pub fn array_dimensions(&self, path: &str) -> usize {
    let nav = self.navigator();
    let mut segments = nav.parse(path);
    if let Some(AccessSegment::Step(last)) = segments.last_mut() {
      *last = AccessStep::field(last.property_name.clone());
    }
    nav
      .resolve(&self.root, &segments)
      .map(|v| dimension_sizes(v).len())
      .unwrap_or(0)
  }

  /// Length at each nesting level, following first elements: a 3x3 matrix gives `[3, 3]`.
  pub fn array_dimension_sizes(&self, path: &str) -> Vec<usize> {
    self.read_value(path).map(dimension_sizes).unwrap_or_default()
  }

  pub fn read_multi_dimensional(&self, path: &str, indices: &[usize]) -> Option<&Value> {
    index_into(self.read_value(path)?, indices)
  }

  fn read_at<T: ScalarRead>(&self, path: &str, indices: &[usize], default: T) -> T {
    read_scalar(self.read_multi_dimensional(path, indices), default, self.opts.scalar_policy)
  }

  pub fn read_2d_int(&self, path: &str, row: usize, col: usize, default: i64) -> i64 {
    self.read_at(path, &[row, col], default)
  }

  pub fn read_2d_float(&self, path: &str, row: usize, col: usize, default: f64) -> f64 {
    self.read_at(path, &[row, col], default)
  }

  pub fn read_2d_string(&self, path: &str, row: usize, col: usize, default: &str) -> String {
    self.read_at(path, &[row, col], default.to_string())
  }

  pub fn read_2d_bool(&self, path: &str, row: usize, col: usize, default: bool) -> bool {
    self.read_at(path, &[row, col], default)
  }

  pub fn read_3d_int(&self, path: &str, x: usize, y: usize, z: usize, default: i64) -> i64 {
    self.read_at(path, &[x, y, z], default)
  }

  pub fn read_3d_float(&self, path: &str, x: usize, y: usize, z: usize, default: f64) -> f64 {
    self.read_at(path, &[x, y, z], default)
  }

  pub fn read_3d_string(&self, path: &str, x: usize, y: usize, z: usize, default: &str) -> String {
    self.read_at(path, &[x, y, z], default.to_string())
  }

  pub fn read_3d_bool(&self, path: &str, x: usize, y: usize, z: usize, default: bool) -> bool {
    self.read_at(path, &[x, y, z], default)
  }
}

fn dimension_sizes(v: &Value) -> Vec<usize> {
  let mut sizes = Vec::new();
  let mut current = v;
  while let Value::Array(items) = current {
    sizes.push(items.len());
    match items.first() {
      Some(first) => current = first,
      None => break,
    }
  }
  sizes
}
