use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
  document::JsonDocument,
  models::{AccessOptions, JsonValueKind, Task, TaskInfo, TaskKind},
  storage::{Storage, StorageOptions},
  tasks::{TaskManager, TaskManagerOptions},
};

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("file not found: {}", .0.display())]
  FileNotFound(PathBuf),
  #[error("invalid json: {0}")]
  InvalidJson(String),
  #[error("empty input")]
  EmptyInput,
  #[error("top-level value must be an object, got {0:?}")]
  NotAnObject(JsonValueKind),
  #[error("unknown task: {0}")]
  UnknownTask(String),
  #[error("task error: {0}")]
  Task(String),
  #[error("invalid argument: {0}")]
  InvalidArg(String),
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
  /// Applied to every document the engine creates or loads.
  pub access: AccessOptions,
  pub max_concurrent_tasks: usize,
  /// Finished loads that are never collected are dropped after this long.
  pub finished_task_ttl_ms: i64,
  pub storage: StorageOptions,
}

impl Default for EngineOptions {
  fn default() -> Self {
    Self {
      access: AccessOptions::default(),
      max_concurrent_tasks: 2,
      finished_task_ttl_ms: 10 * 60 * 1000,
      storage: StorageOptions::default(),
    }
  }
}

/// Entry point for loading and saving documents, synchronously or on a worker thread.
#[derive(Clone)]
pub struct JsonEngine {
  options: EngineOptions,
  tasks: TaskManager,
  storage: Storage,
}

impl JsonEngine {
  pub fn new(options: EngineOptions) -> Self {
    let storage = Storage::new(options.storage.clone());
    let tasks = TaskManager::new(TaskManagerOptions {
      max_concurrent_tasks: options.max_concurrent_tasks,
      finished_ttl_ms: options.finished_task_ttl_ms,
    });
    Self {
      options,
      tasks,
      storage,
    }
  }

  pub fn options(&self) -> &EngineOptions {
    &self.options
  }

  pub fn create_empty(&self) -> JsonDocument {
    JsonDocument::empty().with_options(self.options.access)
  }

  pub fn load_from_string(&self, text: &str) -> Result<JsonDocument, CoreError> {
    Ok(JsonDocument::from_string(text)?.with_options(self.options.access))
  }

  /// Relative paths resolve against the storage content root unless `absolute` is set.
  pub fn load_from_file(&self, path: impl AsRef<Path>, absolute: bool) -> Result<JsonDocument, CoreError> {
    let path = path.as_ref();
    let text = self.storage.read_text(path, absolute)?;
    let doc = self.load_from_string(&text)?;
    tracing::debug!(target: "ja_core", path = %path.display(), bytes = text.len(), "loaded document");
    Ok(doc)
  }

  pub fn save_to_string(&self, doc: &JsonDocument, pretty: bool) -> String {
    doc.to_string(pretty)
  }

  /// Write `doc` to disk, creating missing directories. Returns the path written.
  pub fn save_to_file(
    &self,
    doc: &JsonDocument,
    path: impl AsRef<Path>,
    absolute: bool,
    pretty: bool,
  ) -> Result<PathBuf, CoreError> {
    let written = self
      .storage
      .write_text(path, absolute, &doc.to_string(pretty))?;
    tracing::debug!(target: "ja_core", path = %written.display(), "saved document");
    Ok(written)
  }

  // ---- background loads ----

  pub fn start_load_from_file(&self, path: impl AsRef<Path>, absolute: bool) -> Result<TaskInfo, CoreError> {
    let id = self.tasks.start_load_from_file(
      self.storage.clone(),
      path.as_ref().to_path_buf(),
      absolute,
      self.options.access,
    )?;
    Ok(TaskInfo {
      id,
      kind: TaskKind::LoadFromFile,
      cancellable: true,
    })
  }

  pub fn start_load_from_string(&self, text: impl Into<String>) -> Result<TaskInfo, CoreError> {
    let id = self
      .tasks
      .start_load_from_string(self.storage.clone(), text.into(), self.options.access)?;
    Ok(TaskInfo {
      id,
      kind: TaskKind::LoadFromString,
      cancellable: true,
    })
  }

  pub fn get_task(&self, task_id: &str) -> Result<Task, CoreError> {
    self.tasks.get_task(task_id)
  }

  pub fn cancel_task(&self, task_id: &str) -> Result<(), CoreError> {
    self.tasks.cancel_task(task_id)
  }

  /// Collect the document of a finished load. The task is forgotten afterwards.
  pub fn take_task_result(&self, task_id: &str) -> Result<JsonDocument, CoreError> {
    self.tasks.take_result(task_id)
  }
}
