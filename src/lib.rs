//! Core library surface for the Bible Memory TUI application.
//!
//! The reference codec and verse store are independent leaves; the lookup
//! service composes them and is the only thing the terminal front-end calls.
//! Keeping the layers separate lets the parser and scanner be tested without
//! a terminal or a real corpus file.
pub mod codec;
pub mod config;
pub mod models;
pub mod service;
pub mod store;
pub mod ui;

/// Reference parsing and the marker filename encoding.
pub use codec::{decode_marker_name, encode_marker_name, parse_reference, ParseError};

pub use config::Config;

/// Domain values shared by every layer.
pub use models::{Reference, SaveOutcome, VerseQuery};

/// The collaborator-facing API.
pub use service::{LookupError, VerseLookupService};

pub use store::{CorpusSource, FileCorpus, FsMarkerDir, MarkerDirectory};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
