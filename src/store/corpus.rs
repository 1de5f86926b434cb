use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Anything that can hand out a fresh reader over the verse corpus. Every
/// lookup opens its own reader and drops it when the scan ends, so the
/// source never holds a file handle between calls.
pub trait CorpusSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Human-readable name used in error messages.
    fn name(&self) -> String;
}

/// Corpus backed by a plain text file, one verse per line.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for FileCorpus {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
