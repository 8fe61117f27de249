use serde_json::Value;

use crate::models::{JsonValueKind, ScalarPolicy};

/// Extraction of a concrete scalar from a terminal node.
///
/// `from_node` returns `None` whenever the node cannot be read as `Self` under `policy`; callers
/// substitute their default.
pub trait ScalarRead: Sized {
  fn from_node(node: &Value, policy: ScalarPolicy) -> Option<Self>;
}

/// Absent node, null node or a mismatch all give `default`.
pub fn read_scalar<T: ScalarRead>(node: Option<&Value>, default: T, policy: ScalarPolicy) -> T {
  node
    .and_then(|n| T::from_node(n, policy))
    .unwrap_or(default)
}

pub fn kind_of(v: &Value) -> JsonValueKind {
  match v {
    Value::Null => JsonValueKind::Null,
    Value::Bool(_) => JsonValueKind::Bool,
    Value::Number(_) => JsonValueKind::Number,
    Value::String(_) => JsonValueKind::String,
    Value::Array(_) => JsonValueKind::Array,
    Value::Object(_) => JsonValueKind::Object,
  }
}

impl ScalarRead for i64 {
  fn from_node(node: &Value, policy: ScalarPolicy) -> Option<Self> {
    match node {
      Value::Number(n) => {
        if let Some(i) = n.as_i64() {
          Some(i)
        } else if n.as_u64().is_some() {
          Some(i64::MAX)
        } else {
          // `as` truncates toward zero and saturates at the bounds.
          n.as_f64().map(|f| f as i64)
        }
      }
      Value::String(s) if policy == ScalarPolicy::Lenient => {
        let s = s.trim();
        if s.is_empty() || s.contains('.') {
          return None;
        }
        s.parse::<i64>().ok()
      }
      _ => None,
    }
  }
}

impl ScalarRead for f64 {
  fn from_node(node: &Value, policy: ScalarPolicy) -> Option<Self> {
    match node {
      Value::Number(n) => n.as_f64(),
      Value::String(s) if policy == ScalarPolicy::Lenient => s
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite()),
      _ => None,
    }
  }
}

impl ScalarRead for String {
  fn from_node(node: &Value, policy: ScalarPolicy) -> Option<Self> {
    match (node, policy) {
      (Value::String(s), ScalarPolicy::Strict) => Some(s.clone()),
      (Value::String(s), ScalarPolicy::Lenient) if s.is_empty() => None,
      (Value::String(s), ScalarPolicy::Lenient) => Some(s.clone()),
      (Value::Number(n), ScalarPolicy::Lenient) => Some(n.to_string()),
      (Value::Bool(b), ScalarPolicy::Lenient) => Some(b.to_string()),
      _ => None,
    }
  }
}

impl ScalarRead for bool {
  fn from_node(node: &Value, policy: ScalarPolicy) -> Option<Self> {
    match node {
      Value::Bool(b) => Some(*b),
      Value::String(s) if policy == ScalarPolicy::Lenient => {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
          Some(true)
        } else if s.eq_ignore_ascii_case("false") {
          Some(false)
        } else {
          None
        }
      }
      _ => None,
    }
  }
}

