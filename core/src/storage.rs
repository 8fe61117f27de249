use std::{
  fs, io,
  path::{Path, PathBuf},
};

use crate::engine::CoreError;

#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
  /// Base directory for relative paths. If None, the process working directory.
  pub content_root: Option<PathBuf>,
}

/// Reads and writes document text on disk.
#[derive(Debug, Clone)]
pub struct Storage {
  root: PathBuf,
}

impl Storage {
  pub fn new(opts: StorageOptions) -> Self {
    let root = opts
      .content_root
      .unwrap_or_else(|| PathBuf::from("."));
    Self { root }
  }

  pub fn content_root(&self) -> &Path {
    &self.root
  }

  /// `path` as given when `absolute`, otherwise joined onto the content root.
  pub fn resolve(&self, path: impl AsRef<Path>, absolute: bool) -> PathBuf {
    let path = path.as_ref();
    if absolute || path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    }
  }

  pub fn read_text(&self, path: impl AsRef<Path>, absolute: bool) -> Result<String, CoreError> {
    let full = self.resolve(path, absolute);
    match fs::read_to_string(&full) {
      Ok(text) => Ok(text),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CoreError::FileNotFound(full)),
      Err(e) => Err(CoreError::Io(e)),
    }
  }

  /// Write `text`, creating missing parent directories.
  pub fn write_text(&self, path: impl AsRef<Path>, absolute: bool, text: &str) -> Result<PathBuf, CoreError> {
    let full = self.resolve(path, absolute);
    if let Some(parent) = full.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    fs::write(&full, text)?;
    Ok(full)
  }
}
