use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

/// A place where marker files live. Markers carry no content, so the only
/// operations are a snapshot of entry names and create-if-absent.
pub trait MarkerDirectory {
    fn entry_names(&self) -> Result<Vec<String>>;

    /// Create an empty marker called `name`. Returns `false` when a file of
    /// that name already exists; an existing marker is never overwritten.
    fn create_marker(&self, name: &str) -> Result<bool>;
}

/// Marker directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsMarkerDir {
    root: PathBuf,
}

impl FsMarkerDir {
    /// Open the directory, creating it (and any parents) when missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create marker directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MarkerDirectory for FsMarkerDir {
    fn entry_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("failed to read directory entry")?;
            // Names that are not valid UTF-8 cannot be produced by the encoder.
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn create_marker(&self, name: &str) -> Result<bool> {
        if name.contains(['/', '\\']) {
            bail!("marker name \"{name}\" contains a path separator");
        }

        let path = self.root.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                info!(path = %path.display(), "marker created");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(err) => {
                Err(err).with_context(|| format!("failed to create {}", path.display()))
            }
        }
    }
}
