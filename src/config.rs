//! User-tunable scheduler settings, stored as `config.json` in the data directory.
//!
//! Every field has a default and unknown keys are ignored, so an older or
//! hand-edited file still loads.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::atomic::atomic_write;

pub const CONFIG_FILE: &str = "config.json";
pub const PROGRESS_FILE: &str = "progress.json";
pub const STUDY_LOG_FILE: &str = "study_log.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrsConfig {
    /// Items with an interval below this many days count as young, the rest as mature.
    pub young_threshold_days: u32,
    /// Keep at most this many ratings per item. `None` keeps the full history.
    /// Accuracy in the statistics is computed from the kept ratings only, so a
    /// limit turns it into a recent-accuracy figure.
    pub history_limit: Option<usize>,
    /// Maximum number of items queued in one review session.
    pub review_session_size: usize,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            young_threshold_days: 21,
            history_limit: None,
            review_session_size: 20,
        }
    }
}

impl SrsConfig {
    /// Loads the config at `path`, falling back to defaults when the file is
    /// missing or unreadable. Anything other than a missing file is logged.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Cannot read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        atomic_write(path, json.as_bytes()).map_err(|source| Error::StoreWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Default data directory, e.g. `~/.local/share/vocab-srs` on Linux.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-srs")
}
