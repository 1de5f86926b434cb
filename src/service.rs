//! The collaborator-facing API. The UI only ever talks to
//! [`VerseLookupService`], and every value it hands back is ready to display:
//! parse and I/O failures are folded into text or a [`SaveOutcome`] here and
//! nowhere else.

use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{
    decode_marker_name, encode_marker_name, is_marker_name, parse_reference, ParseError,
};
use crate::models::{SaveOutcome, VerseQuery};
use crate::store::{
    find_range, find_single, format_range, not_found_message, CorpusSource, MarkerDirectory,
};

/// Prefix put in front of every lookup failure shown to the user.
pub const LOOKUP_ERROR_PREFIX: &str = "VPL Error: ";

/// Failures that can stop a lookup before it produces text.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{corpus}: {source}")]
    Corpus {
        corpus: String,
        #[source]
        source: io::Error,
    },
}

pub struct VerseLookupService<C, M> {
    corpus: C,
    markers: M,
}

impl<C: CorpusSource, M: MarkerDirectory> VerseLookupService<C, M> {
    pub fn new(corpus: C, markers: M) -> Self {
        Self { corpus, markers }
    }

    /// Text for a raw reference: the verse, the joined range, the "no text
    /// found" message, or a `VPL Error:` line. Blank input yields an empty
    /// string without touching the corpus.
    pub fn lookup(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        match self.try_lookup(raw) {
            Ok(text) => text,
            Err(err) => {
                warn!(reference = raw.trim(), error = %err, "lookup failed");
                format!("{LOOKUP_ERROR_PREFIX}{err}")
            }
        }
    }

    /// Lookup with failures kept as typed errors.
    pub fn try_lookup(&self, raw: &str) -> Result<String, LookupError> {
        let reference = parse_reference(raw)?;
        debug!(reference = %reference, range = reference.is_range(), "looking up");

        let reader = self.corpus.open().map_err(|source| self.corpus_error(source))?;
        let found = match &reference.query {
            VerseQuery::Single { key } => find_single(reader, key),
            VerseQuery::Range {
                chapter_key,
                start,
                end,
            } => find_range(reader, chapter_key, *start, *end).map(|lines| format_range(&lines)),
        }
        .map_err(|source| self.corpus_error(source))?;

        Ok(found.unwrap_or_else(|| not_found_message(&reference.raw)))
    }

    /// Record a marker for `raw` unless one already exists. Blank input has
    /// nothing to save and reports `AlreadyExists` without any I/O.
    pub fn save_marker(&self, raw: &str) -> SaveOutcome {
        let reference = raw.trim();
        if reference.is_empty() {
            return SaveOutcome::AlreadyExists;
        }

        match self.markers.create_marker(&encode_marker_name(reference)) {
            Ok(true) => SaveOutcome::Created,
            Ok(false) => SaveOutcome::AlreadyExists,
            Err(err) => {
                warn!(reference, error = %err, "failed to save marker");
                SaveOutcome::IoFailure(format!("{err:#}"))
            }
        }
    }

    /// Decoded references of every stored marker, in directory order. A
    /// directory that cannot be read lists as empty.
    pub fn list_markers(&self) -> Vec<String> {
        match self.markers.entry_names() {
            Ok(names) => decode_marker_listing(names),
            Err(err) => {
                let message = format!("{err:#}");
                warn!(error = %message, "failed to list markers");
                Vec::new()
            }
        }
    }

    fn corpus_error(&self, source: io::Error) -> LookupError {
        LookupError::Corpus {
            corpus: self.corpus.name(),
            source,
        }
    }
}

/// Turn a snapshot of directory entry names into displayable references,
/// skipping anything that is not a marker.
pub fn decode_marker_listing<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .filter(|name| is_marker_name(name.as_ref()))
        .map(|name| decode_marker_name(name.as_ref()))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;
    use std::io::{BufRead, Cursor};

    use anyhow::{anyhow, Result};
    use tempfile::TempDir;

    use super::*;
    use crate::store::{FileCorpus, FsMarkerDir};

    /// In-memory corpus that counts how often it is opened.
    pub(crate) struct FakeCorpus {
        pub(crate) text: String,
        pub(crate) opens: Cell<usize>,
    }

    impl FakeCorpus {
        pub(crate) fn new(lines: &[&str]) -> Self {
            Self {
                text: lines.join("\n"),
                opens: Cell::new(0),
            }
        }
    }

    impl CorpusSource for FakeCorpus {
        fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
            self.opens.set(self.opens.get() + 1);
            Ok(Box::new(Cursor::new(self.text.as_bytes())))
        }

        fn name(&self) -> String {
            "fake corpus".to_string()
        }
    }

    /// In-memory marker directory that counts every access.
    #[derive(Default)]
    pub(crate) struct FakeMarkers {
        pub(crate) names: RefCell<BTreeSet<String>>,
        pub(crate) accesses: Cell<usize>,
        pub(crate) broken: bool,
    }

    impl MarkerDirectory for FakeMarkers {
        fn entry_names(&self) -> Result<Vec<String>> {
            self.accesses.set(self.accesses.get() + 1);
            if self.broken {
                return Err(anyhow!("directory is gone"));
            }
            Ok(self.names.borrow().iter().cloned().collect())
        }

        fn create_marker(&self, name: &str) -> Result<bool> {
            self.accesses.set(self.accesses.get() + 1);
            if self.broken {
                return Err(anyhow!("read-only file system"));
            }
            Ok(self.names.borrow_mut().insert(name.to_string()))
        }
    }

    fn service(lines: &[&str]) -> VerseLookupService<FakeCorpus, FakeMarkers> {
        VerseLookupService::new(FakeCorpus::new(lines), FakeMarkers::default())
    }

    #[test]
    fn single_lookup_returns_the_line() {
        let svc = service(&["JOH 3:15 That whosoever", "JOH 3:16 For God so loved..."]);
        assert_eq!(svc.lookup("JOH 3:16"), "JOH 3:16 For God so loved...");
    }

    #[test]
    fn single_lookup_respects_the_verse_boundary() {
        let svc = service(&["JOH 3:10 Verily"]);
        assert_eq!(svc.lookup("JOH 3:1"), "No text found for JOH 3:1");
    }

    #[test]
    fn range_lookup_joins_with_blank_lines() {
        let svc = service(&["PSA 23:1 A", "PSA 23:2 B", "PSA 23:3 C"]);
        assert_eq!(svc.lookup("PSA 23:1-2"), "PSA 23:1 A\n\nPSA 23:2 B");
    }

    #[test]
    fn empty_range_reports_no_text_with_the_trimmed_reference() {
        let svc = service(&["PSA 23:1 A"]);
        assert_eq!(svc.lookup("  PSA 23:5-9 "), "No text found for PSA 23:5-9");
        assert_eq!(svc.lookup("PSA 23:3-1"), "No text found for PSA 23:3-1");
    }

    #[test]
    fn blank_input_does_no_io() {
        let svc = service(&["JOH 3:16 For God"]);
        assert_eq!(svc.lookup(""), "");
        assert_eq!(svc.lookup("   "), "");
        assert_eq!(svc.save_marker("  "), SaveOutcome::AlreadyExists);
        assert_eq!(svc.corpus.opens.get(), 0);
        assert_eq!(svc.markers.accesses.get(), 0);
    }

    #[test]
    fn malformed_range_is_rendered_as_error_text() {
        let svc = service(&["PSA 23:1 A"]);
        let text = svc.lookup("PSA 23 1-6");
        assert!(text.starts_with("VPL Error:"), "{text}");
        assert_eq!(svc.corpus.opens.get(), 0);

        let text = svc.lookup("PSA 23:1-x");
        assert!(text.starts_with("VPL Error: invalid verse number"), "{text}");
    }

    #[test]
    fn missing_corpus_is_rendered_as_error_text() {
        let tmp = TempDir::new().unwrap();
        let svc = VerseLookupService::new(
            FileCorpus::new(tmp.path().join("bible.txt")),
            FakeMarkers::default(),
        );
        let text = svc.lookup("JOH 3:16");
        assert!(text.starts_with("VPL Error: "), "{text}");
        assert!(text.contains("bible.txt"), "{text}");
        assert!(matches!(
            svc.try_lookup("JOH 3:16"),
            Err(LookupError::Corpus { .. })
        ));
    }

    #[test]
    fn latin1_corpus_file_still_answers_lookups() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bible.txt");
        std::fs::write(&path, b"PSA 23:1 A\nGEN 1:1 caf\xe9\nPSA 23:2 B\n").unwrap();
        let svc = VerseLookupService::new(FileCorpus::new(&path), FakeMarkers::default());

        assert_eq!(svc.lookup("PSA 23:1-2"), "PSA 23:1 A\n\nPSA 23:2 B");
        assert_eq!(svc.lookup("PSA 23:2"), "PSA 23:2 B");
    }

    #[test]
    fn saving_twice_creates_one_marker() {
        let tmp = TempDir::new().unwrap();
        let svc = VerseLookupService::new(
            FakeCorpus::new(&[]),
            FsMarkerDir::open(tmp.path()).unwrap(),
        );

        assert_eq!(svc.save_marker("JOH 3:16"), SaveOutcome::Created);
        assert_eq!(svc.save_marker(" JOH 3:16 "), SaveOutcome::AlreadyExists);

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(svc.list_markers(), vec!["JOH 3:16"]);
    }

    #[test]
    fn save_failure_is_an_outcome() {
        let svc = VerseLookupService::new(
            FakeCorpus::new(&[]),
            FakeMarkers {
                broken: true,
                ..FakeMarkers::default()
            },
        );
        assert_eq!(
            svc.save_marker("JOH 3:16"),
            SaveOutcome::IoFailure("read-only file system".to_string())
        );
        assert!(svc.list_markers().is_empty());
    }

    #[test]
    fn listing_decodes_markers_and_skips_other_files() {
        let svc = service(&[]);
        svc.save_marker("PSA 23:1-6");
        svc.save_marker("JOH 3:16");
        svc.markers
            .names
            .borrow_mut()
            .insert("notes.txt".to_string());

        let mut listed = svc.list_markers();
        listed.sort();
        assert_eq!(listed, vec!["JOH 3:16", "PSA 23:1-6"]);
    }

    #[test]
    fn decode_listing_is_a_pure_function() {
        let listed = decode_marker_listing(["GEN 1-1_3.jpg", "README", "REV 22-21.jpg"]);
        assert_eq!(listed, vec!["GEN 1:1-3", "REV 22:21"]);
    }
}
