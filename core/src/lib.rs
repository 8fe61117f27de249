pub mod access;
mod debug;
mod document;
mod engine;
mod models;
mod storage;
mod tasks;
mod value;

pub use crate::access::{
  contains_array_access, is_valid_access_string, max_array_depth, parse_access_string, parse_steps,
  sanitize_access_string, Mutator, Navigator,
};
pub use crate::document::JsonDocument;
pub use crate::engine::{EngineOptions, JsonEngine};
pub use crate::models::{
  AccessOptions, AccessSegment, AccessStep, DebugLevel, GrammarMode, JsonValueKind, ScalarPolicy,
  Task, TaskInfo, TaskKind,
};
pub use crate::storage::{Storage, StorageOptions};
pub use crate::value::{kind_of, read_scalar, ScalarRead};

pub use crate::engine::CoreError;
