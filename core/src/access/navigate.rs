use serde_json::{Map, Value};

use crate::{
  access::parser::parse_access_string,
  debug::DebugTrace,
  models::{AccessOptions, AccessSegment, GrammarMode},
};

/// Read-only walker over a JSON tree.
///
/// Every failure (missing field, index past the end, scalar where a container was expected)
/// resolves to `None`; nothing here panics or returns an error.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
  opts: AccessOptions,
  trace: DebugTrace,
}

impl Navigator {
  pub fn new(opts: AccessOptions) -> Self {
    Self {
      opts,
      trace: DebugTrace::new(opts.debug_level),
    }
  }

  pub fn options(&self) -> AccessOptions {
    self.opts
  }

  /// Parse with this navigator's grammar (and trace the result at `Verbose`).
  pub fn parse(&self, path: &str) -> Vec<AccessSegment> {
    let segments = parse_access_string(path, self.opts.grammar);
    self.trace.parsed(path, &segments);
    segments
  }

  /// Resolve to a single node. An empty path is the root itself.
  pub fn resolve<'a>(&self, root: &'a Value, segments: &[AccessSegment]) -> Option<&'a Value> {
    self.walk(root, segments, true)
  }

  /// Plural read used by `read_objects`.
  ///
  /// The final step, when it carries no index, yields every element of the array it names
  /// (`None` for an empty array) or the single node otherwise. An indexed final step yields one
  /// element.
  pub fn resolve_all<'a>(&self, root: &'a Value, segments: &[AccessSegment]) -> Option<Vec<&'a Value>> {
    let Some((last, parents)) = segments.split_last() else {
      return Some(vec![root]);
    };
    let parent = self.walk(root, parents, false)?;

    let step = match last {
      AccessSegment::Attribute { name } => return self.attribute(parent, name).map(|v| vec![v]),
      AccessSegment::Step(step) => step,
    };

    let field = match self.field(parent, &step.property_name) {
      Some(f) => f,
      None if self.legacy_fallback(step.is_array_access) => {
        return self.attribute_key(parent, &step.property_name).map(|v| vec![v]);
      }
      None => return None,
    };

    if step.is_array_access {
      return index_into(field, &step.indices).map(|v| vec![v]);
    }
    match field {
      Value::Array(items) if items.is_empty() => None,
      Value::Array(items) => Some(items.iter().collect()),
      other => Some(vec![other]),
    }
  }

  /// Look up `name` on an object node, honouring the case-sensitivity setting.
  pub fn field<'a>(&self, node: &'a Value, name: &str) -> Option<&'a Value> {
    node.as_object().and_then(|map| self.lookup(map, name))
  }

  pub(crate) fn lookup<'a>(&self, map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(v) = map.get(name) {
      return Some(v);
    }
    if self.opts.case_sensitive {
      return None;
    }
    map
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v)
  }

  /// Name of the key `name` matches in `map`, if any (exact match wins over a folded one).
  pub(crate) fn matching_key(&self, map: &Map<String, Value>, name: &str) -> Option<String> {
    if map.contains_key(name) {
      return Some(name.to_string());
    }
    if self.opts.case_sensitive {
      return None;
    }
    map.keys().find(|k| k.eq_ignore_ascii_case(name)).cloned()
  }

  fn walk<'a>(&self, root: &'a Value, segments: &[AccessSegment], final_fallback: bool) -> Option<&'a Value> {
    let mut current = root;
    let last = segments.len().saturating_sub(1);

    for (i, seg) in segments.iter().enumerate() {
      let step = match seg {
        AccessSegment::Attribute { name } => return self.attribute(current, name),
        AccessSegment::Step(step) => step,
      };

      let field = match self.field(current, &step.property_name) {
        Some(f) => f,
        None if final_fallback && i == last && self.legacy_fallback(step.is_array_access) => {
          return self.attribute_key(current, &step.property_name);
        }
        None => {
          self.trace.detail(
            "resolve",
            format_args!("step {i}: field '{}' not found", step.property_name),
          );
          return None;
        }
      };

      current = match index_into(field, &step.indices) {
        Some(v) => v,
        None => {
          self.trace.detail(
            "resolve",
            format_args!("step {i}: indices {:?} out of range on '{}'", step.indices, step.property_name),
          );
          return None;
        }
      };
    }

    Some(current)
  }

  fn legacy_fallback(&self, is_array_access: bool) -> bool {
    self.opts.grammar == GrammarMode::Legacy && !is_array_access
  }

  /// Legacy `@name`: an explicit `"@name"` key wins, otherwise a scalar field `name`.
  fn attribute<'a>(&self, node: &'a Value, name: &str) -> Option<&'a Value> {
    if let Some(v) = self.attribute_key(node, name) {
      return Some(v);
    }
    self
      .field(node, name)
      .filter(|v| !v.is_object() && !v.is_array())
  }

  fn attribute_key<'a>(&self, node: &'a Value, name: &str) -> Option<&'a Value> {
    self.field(node, &format!("@{name}"))
  }
}

/// Follow `indices` through nested arrays. No negative indices and no wraparound.
pub(crate) fn index_into<'a>(value: &'a Value, indices: &[usize]) -> Option<&'a Value> {
  indices
    .iter()
    .try_fold(value, |v, &i| v.as_array().and_then(|a| a.get(i)))
}
