use std::{
  collections::HashMap,
  path::PathBuf,
  sync::{
    atomic::{AtomicBool, AtomicI64, AtomicU8, AtomicUsize, Ordering},
    Arc,
  },
  thread,
  time::{SystemTime, UNIX_EPOCH},
};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
  document::JsonDocument,
  engine::CoreError,
  models::{AccessOptions, Task, TaskKind},
  storage::Storage,
};

#[derive(Debug, Clone)]
pub struct TaskManagerOptions {
  pub max_concurrent_tasks: usize,
  /// Finished tasks nobody collected are dropped this long after finishing.
  pub finished_ttl_ms: i64,
}

/// Background document loads.
///
/// A worker parses into its own tree and publishes it only once complete; the caller collects it
/// with [`TaskManager::take_result`].
#[derive(Clone)]
pub struct TaskManager {
  opts: TaskManagerOptions,
  tasks: Arc<Mutex<HashMap<String, Arc<TaskState>>>>,
  running: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct TaskState {
  id: String,
  kind: TaskKind,
  started_at_ms: i64,
  finished_at_ms: AtomicI64,

  progress: AtomicU8,
  finished: AtomicBool,
  cancelled: AtomicBool,
  error: Mutex<Option<String>>,
  result: Mutex<Option<Result<JsonDocument, CoreError>>>,
}

enum LoadSource {
  File { path: PathBuf, absolute: bool },
  Text(String),
}

impl TaskManager {
  pub fn new(opts: TaskManagerOptions) -> Self {
    Self {
      opts,
      tasks: Arc::new(Mutex::new(HashMap::new())),
      running: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub(crate) fn start_load_from_file(
    &self,
    storage: Storage,
    path: PathBuf,
    absolute: bool,
    access: AccessOptions,
  ) -> Result<String, CoreError> {
    if path.as_os_str().is_empty() {
      return Err(CoreError::InvalidArg("path is empty".into()));
    }
    self.spawn(TaskKind::LoadFromFile, storage, LoadSource::File { path, absolute }, access)
  }

  pub(crate) fn start_load_from_string(
    &self,
    storage: Storage,
    text: String,
    access: AccessOptions,
  ) -> Result<String, CoreError> {
    self.spawn(TaskKind::LoadFromString, storage, LoadSource::Text(text), access)
  }

  fn spawn(
    &self,
    kind: TaskKind,
    storage: Storage,
    source: LoadSource,
    access: AccessOptions,
  ) -> Result<String, CoreError> {
    self.evict_expired();

    let max = self.opts.max_concurrent_tasks;
    let reserved = self
      .running
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1));
    if reserved.is_err() {
      return Err(CoreError::Task(format!("too many concurrent tasks (max {max})")));
    }

    let id = Uuid::new_v4().to_string();
    let state = Arc::new(TaskState {
      id: id.clone(),
      kind,
      started_at_ms: now_ms(),
      finished_at_ms: AtomicI64::new(0),
      progress: AtomicU8::new(0),
      finished: AtomicBool::new(false),
      cancelled: AtomicBool::new(false),
      error: Mutex::new(None),
      result: Mutex::new(None),
    });
    self.tasks.lock().insert(id.clone(), state.clone());

    let running = self.running.clone();
    thread::spawn(move || {
      let res = run_load(&state, &storage, source).map(|doc| doc.with_options(access));
      match res {
        Ok(doc) if !state.cancelled.load(Ordering::SeqCst) => {
          *state.result.lock() = Some(Ok(doc));
        }
        Ok(_) => {
          *state.error.lock() = Some("cancelled".into());
        }
        Err(e) => {
          tracing::warn!(target: "ja_core", task = %state.id, error = %e, "load task failed");
          *state.error.lock() = Some(e.to_string());
          *state.result.lock() = Some(Err(e));
        }
      }
      state.progress.store(100, Ordering::SeqCst);
      state.finished_at_ms.store(now_ms(), Ordering::SeqCst);
      state.finished.store(true, Ordering::SeqCst);
      running.fetch_sub(1, Ordering::SeqCst);
    });

    Ok(id)
  }

  // Forget finished tasks older than the ttl; running ones are never evicted.
  fn evict_expired(&self) {
    let cutoff = now_ms() - self.opts.finished_ttl_ms;
    self.tasks.lock().retain(|_, t| {
      !t.finished.load(Ordering::SeqCst) || t.finished_at_ms.load(Ordering::SeqCst) > cutoff
    });
  }

  fn state(&self, task_id: &str) -> Result<Arc<TaskState>, CoreError> {
    self
      .tasks
      .lock()
      .get(task_id)
      .cloned()
      .ok_or_else(|| CoreError::UnknownTask(task_id.to_string()))
  }

  pub fn get_task(&self, task_id: &str) -> Result<Task, CoreError> {
    let t = self.state(task_id)?;
    let err = t.error.lock().clone();
    Ok(Task {
      id: t.id.clone(),
      kind: t.kind.clone(),
      started_at_ms: t.started_at_ms,
      progress_0_100: t.progress.load(Ordering::SeqCst),
      cancellable: true,
      finished: t.finished.load(Ordering::SeqCst),
      error: err,
    })
  }

  /// Request cancellation. A cancelled load never publishes its document.
  pub fn cancel_task(&self, task_id: &str) -> Result<(), CoreError> {
    let t = self.state(task_id)?;
    t.cancelled.store(true, Ordering::SeqCst);
    Ok(())
  }

  /// Remove a finished task and hand over its document (or its error).
  pub fn take_result(&self, task_id: &str) -> Result<JsonDocument, CoreError> {
    let t = self.state(task_id)?;
    if !t.finished.load(Ordering::SeqCst) {
      return Err(CoreError::Task(format!("task {task_id} is still running")));
    }
    self.tasks.lock().remove(task_id);
    if t.cancelled.load(Ordering::SeqCst) {
      return Err(CoreError::Task(format!("task {task_id} was cancelled")));
    }
    let result = t.result.lock().take();
    result.unwrap_or_else(|| Err(CoreError::Task(format!("task {task_id} produced no result"))))
  }
}

fn run_load(state: &TaskState, storage: &Storage, source: LoadSource) -> Result<JsonDocument, CoreError> {
  let text = match source {
    LoadSource::File { path, absolute } => storage.read_text(path, absolute)?,
    LoadSource::Text(text) => text,
  };
  state.progress.store(50, Ordering::SeqCst);
  if state.cancelled.load(Ordering::SeqCst) {
    return Err(CoreError::Task("cancelled".into()));
  }
  JsonDocument::from_string(&text)
}

pub(crate) fn now_ms() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_millis() as i64
}
