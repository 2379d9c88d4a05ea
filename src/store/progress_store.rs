//! File-backed persistence of the whole progress snapshot.
//!
//! The snapshot is a single JSON object keyed by item id:
//! ```json
//! { "你好": { "repetitions": 1, "interval": 1, "easiness": 2.5,
//!            "due_date": "2024-01-02T09:00:00Z",
//!            "last_reviewed": "2024-01-01T09:00:00Z", "history": [4] } }
//! ```
//! Every save rewrites the whole file through a temp file and a rename, so a
//! crash mid-save leaves the previous snapshot in place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};

use super::atomic::atomic_write;
use crate::error::{Error, Result};
use crate::models::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreState {
    /// No snapshot on disk yet.
    Uninitialized,
    Ready,
}

#[derive(Clone, Debug)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> StoreState {
        if self.path.is_file() {
            StoreState::Ready
        } else {
            StoreState::Uninitialized
        }
    }

    /// Reads the snapshot. A missing file is a first run and yields an empty
    /// mapping.
    pub fn load(&self) -> Result<Progress> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No progress snapshot at {}, starting empty", self.path.display());
                return Ok(Progress::new());
            }
            Err(source) => {
                return Err(Error::StoreRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let progress: Progress =
            serde_json::from_str(&content).map_err(|source| Error::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        debug!("Loaded {} review states from {}", progress.len(), self.path.display());
        Ok(progress)
    }

    /// Writes the whole mapping, replacing the previous snapshot atomically.
    pub fn save(&self, progress: &Progress) -> Result<()> {
        let json = serde_json::to_string_pretty(progress).map_err(|e| Error::StoreWrite {
            path: self.path.clone(),
            source: e.into(),
        })?;

        atomic_write(&self.path, json.as_bytes()).map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} review states to {}", progress.len(), self.path.display());
        Ok(())
    }

    /// Moves an unreadable snapshot out of the way and returns where it went.
    pub fn backup_corrupt(&self) -> Result<PathBuf> {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d%H%M%S")));
        let backup_path = self.path.with_file_name(name);

        fs::rename(&self.path, &backup_path).map_err(|source| Error::StoreWrite {
            path: backup_path.clone(),
            source,
        })?;
        Ok(backup_path)
    }

    /// Loads the snapshot, and if it is corrupt backs it up and starts fresh.
    /// Read and write failures are still returned.
    pub fn load_or_recover(&self) -> Result<Progress> {
        match self.load() {
            Err(Error::CorruptStore { path, source }) => {
                let backup = self.backup_corrupt()?;
                warn!(
                    "Progress snapshot {} is corrupt ({}), moved to {} and starting fresh",
                    path.display(),
                    source,
                    backup.display()
                );
                Ok(Progress::new())
            }
            other => other,
        }
    }
}
