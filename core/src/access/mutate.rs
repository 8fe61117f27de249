use serde_json::{Map, Value};

use crate::{
  access::{
    navigate::Navigator,
    parser::parse_steps,
    validate::{is_valid_access_string, sanitize_access_string},
  },
  debug::DebugTrace,
  models::{AccessOptions, AccessStep, GrammarMode},
};

/// Largest index a write may pad an array out to.
pub const MAX_WRITE_INDEX: usize = 1 << 20;

const WRITE_HINT: &str = "use identifiers and [n] groups separated by '.', e.g. a.b[0].c";

/// Writes into a JSON tree, creating whatever is missing along the way.
///
/// Arrays only ever grow (padding with `null`); a node that has to become a container but holds
/// something else is replaced.
#[derive(Debug, Clone, Copy)]
pub struct Mutator {
  nav: Navigator,
  trace: DebugTrace,
}

impl Mutator {
  pub fn new(opts: AccessOptions) -> Self {
    Self {
      nav: Navigator::new(opts),
      trace: DebugTrace::new(opts.debug_level),
    }
  }

  /// Sanitize, validate and write. Returns false when the path is rejected.
  pub fn write(&self, root: &mut Value, path: &str, value: Value) -> bool {
    let _scope = self.trace.scope("write", path);
    let Some(steps) = self.write_steps(path) else {
      return false;
    };
    let ok = self.set_value(root, &steps, value);
    if ok {
      self.trace.success("write", format_args!("wrote '{path}'"));
    } else {
      self.trace.failure(path, "write_failed", WRITE_HINT);
    }
    ok
  }

  /// Sanitize, validate and append to the array at `path`.
  pub fn append(&self, root: &mut Value, path: &str, value: Value) -> bool {
    let _scope = self.trace.scope("append", path);
    let Some(steps) = self.write_steps(path) else {
      return false;
    };
    let ok = self.append_value(root, &steps, value);
    if ok {
      self.trace.success("append", format_args!("appended to '{path}'"));
    } else {
      self.trace.failure(path, "append_failed", WRITE_HINT);
    }
    ok
  }

  /// Make sure every step exists as an object (indexed steps: an object inside padded arrays)
  /// and return the innermost one. A non-object root is replaced by `{}`.
  pub fn ensure_path<'a>(&self, root: &'a mut Value, steps: &[AccessStep]) -> Option<&'a mut Map<String, Value>> {
    if !within_write_limit(steps) {
      return None;
    }
    let mut current = force_object(root)?;
    for step in steps {
      let key = self.key_for(current, &step.property_name);
      let field = current.entry(key).or_insert(Value::Null);
      let slot = grow_path(field, &step.indices)?;
      current = force_object(slot)?;
    }
    Some(current)
  }

  pub fn set_value(&self, root: &mut Value, steps: &[AccessStep], value: Value) -> bool {
    let Some((last, parents)) = steps.split_last() else {
      return false;
    };
    if !within_write_limit(steps) {
      return false;
    }
    let Some(parent) = self.ensure_path(root, parents) else {
      return false;
    };

    let key = self.key_for(parent, &last.property_name);
    let field = parent.entry(key).or_insert(Value::Null);
    match grow_path(field, &last.indices) {
      Some(slot) => {
        *slot = value;
        true
      }
      None => false,
    }
  }

  /// Push `value` onto the array at the final step, creating it (or replacing a non-array)
  /// as needed. Indices on the final step select a nested array.
  pub fn append_value(&self, root: &mut Value, steps: &[AccessStep], value: Value) -> bool {
    let Some((last, parents)) = steps.split_last() else {
      return false;
    };
    if !within_write_limit(steps) {
      return false;
    }
    let Some(parent) = self.ensure_path(root, parents) else {
      return false;
    };

    let key = self.key_for(parent, &last.property_name);
    let field = parent.entry(key).or_insert(Value::Null);
    let Some(target) = grow_path(field, &last.indices) else {
      return false;
    };

    let mut items = match target.take() {
      Value::Array(items) => items,
      _ => Vec::new(),
    };
    items.push(value);
    *target = Value::Array(items);
    true
  }

  fn write_steps(&self, path: &str) -> Option<Vec<AccessStep>> {
    let sanitized = sanitize_access_string(path);
    if !is_valid_access_string(&sanitized) {
      self.trace.failure(path, "invalid_access_string", WRITE_HINT);
      return None;
    }
    let steps = parse_steps(&sanitized);
    // Legacy reads take one index per segment, so a multi-index write could not be read back.
    if self.nav.options().grammar == GrammarMode::Legacy && steps.iter().any(|s| s.indices.len() > 1) {
      self.trace.failure(path, "multi_index_in_legacy_grammar", "legacy paths take one [n] per segment");
      return None;
    }
    Some(steps)
  }

  // Existing key that `name` matches under the lookup rules, or `name` itself.
  fn key_for(&self, map: &Map<String, Value>, name: &str) -> String {
    self
      .nav
      .matching_key(map, name)
      .unwrap_or_else(|| name.to_string())
  }
}

fn within_write_limit(steps: &[AccessStep]) -> bool {
  steps
    .iter()
    .flat_map(|s| s.indices.iter())
    .all(|&i| i <= MAX_WRITE_INDEX)
}

fn force_object(v: &mut Value) -> Option<&mut Map<String, Value>> {
  if !v.is_object() {
    *v = Value::Object(Map::new());
  }
  v.as_object_mut()
}

fn force_array(v: &mut Value) -> Option<&mut Vec<Value>> {
  if !v.is_array() {
    *v = Value::Array(Vec::new());
  }
  v.as_array_mut()
}

// Walk `indices` through nested arrays, padding with nulls, and return the addressed slot.
fn grow_path<'a>(field: &'a mut Value, indices: &[usize]) -> Option<&'a mut Value> {
  let mut slot = field;
  for &i in indices {
    let items = force_array(slot)?;
    if items.len() <= i {
      items.resize(i + 1, Value::Null);
    }
    slot = items.get_mut(i)?;
  }
  Some(slot)
}
