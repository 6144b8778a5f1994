use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{slot::StateSlot, todo::Task};

/// `StateSlot` backed by a single JSON file: the whole collection is
/// serialized as one array and the file is overwritten on every persist.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates missing parent directories so a first persist can succeed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateSlot for FileSlot {
    fn persist(&mut self, tasks: &[Task]) -> Result<()> {
        let encoded = serde_json::to_string(tasks)?;
        fs::write(&self.path, encoded)
            .with_context(|| format!("writing {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "persisted");
        Ok(())
    }

    fn restore(&self) -> Result<Vec<Task>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                // Undecodable contents fall back to an empty collection
                // instead of surfacing an error; the warning is the only
                // trace the data left behind.
                tracing::warn!(path = %self.path.display(), error = %e, "stored tasks undecodable, starting empty");
                Ok(Vec::new())
            }
        }
    }
}
