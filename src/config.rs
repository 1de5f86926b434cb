use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".bible-memory";
/// Verse corpus file name inside the data directory.
const CORPUS_FILE_NAME: &str = "bible.txt";
/// Marker folder name inside the data directory.
const MARKER_DIR_NAME: &str = "verses";
const LOG_FILE_NAME: &str = "bible-memory.log";

pub const CORPUS_ENV: &str = "BIBLE_MEMORY_CORPUS";
pub const MARKERS_ENV: &str = "BIBLE_MEMORY_MARKERS";
pub const LOG_ENV: &str = "BIBLE_MEMORY_LOG";

/// Where the application reads verses from and keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub corpus_path: PathBuf,
    pub marker_dir: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve paths from the user's home directory and the process
    /// environment.
    pub fn load() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::from_home(base_dirs.home_dir(), |key| env::var(key).ok()))
    }

    /// Build the configuration from an explicit home directory and variable
    /// lookup. Non-empty variables override the default locations.
    pub fn from_home<F>(home: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = home.join(DATA_DIR_NAME);
        let resolve = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            corpus_path: resolve(CORPUS_ENV, data_dir.join(CORPUS_FILE_NAME)),
            marker_dir: resolve(MARKERS_ENV, data_dir.join(MARKER_DIR_NAME)),
            log_path: resolve(LOG_ENV, data_dir.join(LOG_FILE_NAME)),
        }
    }
}
