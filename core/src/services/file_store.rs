// cartstore/src/services/file_store.rs

use super::KeyValueStore;
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// A `KeyValueStore` with one JSON file per key inside a directory.
///
/// Keys are mapped to file names by replacing every character outside
/// `[A-Za-z0-9_-]` with `_`. Writes go to a temporary sibling first and are
/// renamed into place, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
    let root = root.into();
    fs::create_dir_all(&root).with_context(|| format!("creating storage directory {}", root.display()))?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn path_for(&self, key: &str) -> PathBuf {
    let file_stem: String = key
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
      .collect();
    self.root.join(format!("{}.json", file_stem))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    let path = self.path_for(key);
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    let path = self.path_for(key);
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, value).with_context(|| format!("writing {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &path).with_context(|| format!("replacing {}", path.display()))?;
    event!(Level::TRACE, path = %path.display(), bytes = value.len(), "Value written.");
    Ok(())
  }
}
