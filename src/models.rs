//! Domain values that flow between the codec, the verse store and the TUI.
//! They are plain data holders: parsing lives in `codec`, scanning lives in
//! `store`, and nothing here performs I/O.

use std::fmt;

/// A parsed scripture reference. The trimmed input is kept next to the query
/// because the "no text found" message and the marker filename are both built
/// from what the user typed, not from a normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Trimmed raw reference, e.g. `PSA 23:1-6`.
    pub raw: String,
    /// What to scan the corpus for.
    pub query: VerseQuery,
}

/// The two query shapes the corpus scan understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseQuery {
    /// One verse. `key` is the whole reference (`JOH 3:16`) and is matched as
    /// a line prefix followed by a space.
    Single { key: String },
    /// Inclusive verse range inside one book and chapter. `chapter_key` is the
    /// opaque `BOOK CHAP:` prefix, matched as a substring of each line.
    Range {
        chapter_key: String,
        start: u32,
        end: u32,
    },
}

impl Reference {
    pub fn is_range(&self) -> bool {
        matches!(self.query, VerseQuery::Range { .. })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Result of asking for a marker to be written. Every variant is a condition
/// the UI surfaces to the user; none of them is a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    /// The marker file was already on disk, or there was nothing to save.
    AlreadyExists,
    IoFailure(String),
}

impl SaveOutcome {
    /// Status line text matching the wording of the original dialogs.
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Created => "Marker saved!".to_string(),
            SaveOutcome::AlreadyExists => "Marker already exists.".to_string(),
            SaveOutcome::IoFailure(message) => format!("Error: {message}"),
        }
    }
}
