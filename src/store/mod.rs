//! Corpus scanning and marker storage, split across logical submodules.

mod corpus;
mod markers;
mod verses;

pub use corpus::{CorpusSource, FileCorpus};
pub use markers::{FsMarkerDir, MarkerDirectory};
pub use verses::{find_range, find_single, format_range, not_found_message, verse_number};
