use serde::{Deserialize, Serialize};

/// One dot-separated segment of an access string, e.g. `matrix[1][2]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AccessStep {
  pub property_name: String,
  pub indices: Vec<usize>,
  pub is_array_access: bool,
}

impl AccessStep {
  pub fn field(name: impl Into<String>) -> Self {
    Self {
      property_name: name.into(),
      indices: Vec::new(),
      is_array_access: false,
    }
  }

  /// `indices` must be non-empty; an empty list degrades to a plain field step.
  pub fn indexed(name: impl Into<String>, indices: Vec<usize>) -> Self {
    let is_array_access = !indices.is_empty();
    Self {
      property_name: name.into(),
      indices,
      is_array_access,
    }
  }
}

/// Parse outcome for one segment.
///
/// `Attribute` only appears under [`GrammarMode::Legacy`] and always terminates the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AccessSegment {
  Step(AccessStep),
  Attribute { name: String },
}

impl AccessSegment {
  pub fn as_step(&self) -> Option<&AccessStep> {
    match self {
      AccessSegment::Step(s) => Some(s),
      AccessSegment::Attribute { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrammarMode {
  /// `a.b[0][1].c`: any number of trailing index groups per segment.
  #[default]
  Advanced,
  /// `a.b[0].@id`: one trailing index per segment plus the `@attribute` marker.
  Legacy,
}

/// How a terminal node is turned into a scalar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalarPolicy {
  /// Type must match exactly; no conversion between strings and numbers/bools.
  #[default]
  Strict,
  /// Numeric and boolean strings are parsed; numbers and bools read as text.
  Lenient,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebugLevel {
  #[default]
  None,
  Basic,
  Detailed,
  Verbose,
}

/// Per-instance access configuration. Copied into every navigator/mutator; there is no global.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessOptions {
  pub grammar: GrammarMode,
  pub case_sensitive: bool,
  pub scalar_policy: ScalarPolicy,
  pub debug_level: DebugLevel,
}

impl Default for AccessOptions {
  fn default() -> Self {
    Self {
      grammar: GrammarMode::Advanced,
      case_sensitive: true,
      scalar_policy: ScalarPolicy::Strict,
      debug_level: DebugLevel::None,
    }
  }
}

impl AccessOptions {
  /// Settings matching the older string-tree generation: legacy grammar, case-insensitive
  /// lookup and lenient scalar conversion.
  pub fn legacy() -> Self {
    Self {
      grammar: GrammarMode::Legacy,
      case_sensitive: false,
      scalar_policy: ScalarPolicy::Lenient,
      debug_level: DebugLevel::None,
    }
  }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonValueKind {
  Null,
  Bool,
  Number,
  String,
  Array,
  Object,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
  LoadFromFile,
  LoadFromString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
  pub id: String,
  pub kind: TaskKind,
  pub cancellable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id: String,
  pub kind: TaskKind,
  pub started_at_ms: i64,
  pub progress_0_100: u8,
  pub cancellable: bool,
  pub finished: bool,
  pub error: Option<String>,
}
