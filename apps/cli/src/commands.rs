use std::path::Path;

use ja_core::{
  is_valid_access_string, kind_of, parse_access_string, sanitize_access_string, AccessSegment,
  GrammarMode, JsonEngine, JsonValueKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReadAs {
  Value,
  Int,
  Float,
  String,
  Bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
  pub path: String,
  pub found: bool,
  pub kind: Option<JsonValueKind>,
  pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
  pub path: String,
  pub written: bool,
  pub saved_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeResponse {
  pub path: String,
  pub is_array: bool,
  pub dimensions: usize,
  pub sizes: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
  pub input: String,
  pub sanitized: String,
  pub valid: bool,
  pub segments: Vec<AccessSegment>,
}

/// Read `path` from `file`. `default` is parsed as JSON when it can be, else taken as a string.
pub fn get(engine: &JsonEngine, file: &Path, path: &str, read_as: ReadAs, default: Option<&str>) -> Result<ReadResponse, String> {
  let doc = engine.load_from_file(file, true).map_err(|e| e.to_string())?;
  let node = doc.read_value(path);
  let default = default.map(parse_literal).unwrap_or(Value::Null);

  let value = match read_as {
    ReadAs::Value => node.cloned().unwrap_or(default),
    ReadAs::Int => Value::from(doc.read_int(path, default.as_i64().unwrap_or(0))),
    ReadAs::Float => Value::from(doc.read_float(path, default.as_f64().unwrap_or(0.0))),
    ReadAs::String => Value::from(doc.read_string(path, default.as_str().unwrap_or(""))),
    ReadAs::Bool => Value::from(doc.read_bool(path, default.as_bool().unwrap_or(false))),
  };

  Ok(ReadResponse {
    path: path.to_string(),
    found: node.is_some(),
    kind: node.map(kind_of),
    value,
  })
}

/// Write (or, with `append`, push) `literal` at `path` and save. `out` defaults to `file`.
pub fn set(
  engine: &JsonEngine,
  file: &Path,
  path: &str,
  literal: &str,
  append: bool,
  out: Option<&Path>,
  pretty: bool,
) -> Result<WriteResponse, String> {
  let mut doc = if file.exists() {
    engine.load_from_file(file, true).map_err(|e| e.to_string())?
  } else {
    engine.create_empty()
  };

  let value = parse_literal(literal);
  let written = if append {
    doc.add_value_to_array(path, value)
  } else {
    doc.write_value(path, value)
  };
  if !written {
    return Ok(WriteResponse {
      path: path.to_string(),
      written,
      saved_to: None,
    });
  }

  let target = out.unwrap_or(file);
  let saved = engine
    .save_to_file(&doc, target, true, pretty)
    .map_err(|e| e.to_string())?;
  Ok(WriteResponse {
    path: path.to_string(),
    written,
    saved_to: Some(saved.to_string_lossy().to_string()),
  })
}

pub fn shape(engine: &JsonEngine, file: &Path, path: &str) -> Result<ShapeResponse, String> {
  let doc = engine.load_from_file(file, true).map_err(|e| e.to_string())?;
  Ok(ShapeResponse {
    path: path.to_string(),
    is_array: doc.is_array(path),
    dimensions: doc.array_dimensions(path),
    sizes: doc.array_dimension_sizes(path),
  })
}

pub fn check(path: &str, grammar: GrammarMode) -> CheckResponse {
  let sanitized = sanitize_access_string(path);
  CheckResponse {
    input: path.to_string(),
    valid: is_valid_access_string(&sanitized),
    segments: parse_access_string(&sanitized, grammar),
    sanitized,
  }
}

// `42`, `true`, `{"a":1}` parse as JSON; anything else is a plain string.
fn parse_literal(s: &str) -> Value {
  serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}
