//! Persistence for the study log, kept next to the progress snapshot.
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;

use super::atomic::atomic_write;
use crate::error::{Error, Result};
use crate::models::StudyLog;

#[derive(Clone, Debug)]
pub struct StudyLogStore {
    path: PathBuf,
}

impl StudyLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable logs start over. Losing a streak counter is not
    /// worth refusing to start a session.
    pub fn load(&self) -> Result<StudyLog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StudyLog::default()),
            Err(source) => {
                return Err(Error::StoreRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(log) => Ok(log),
            Err(e) => {
                warn!("Resetting unreadable study log {}: {}", self.path.display(), e);
                Ok(StudyLog::default())
            }
        }
    }

    pub fn save(&self, log: &StudyLog) -> Result<()> {
        let json = serde_json::to_string_pretty(log).map_err(|e| Error::StoreWrite {
            path: self.path.clone(),
            source: e.into(),
        })?;
        atomic_write(&self.path, json.as_bytes()).map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })
    }
}
