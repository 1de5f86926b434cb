//! Conversions between the three shapes a reference takes: what the user
//! types (`PSA 23:1-6`), the parsed [`Reference`], and the marker filename
//! stored on disk (`PSA 23-1_6.jpg`).
//!
//! The marker encoding first escapes range hyphens to underscores and only
//! then turns colons into hyphens, so decoding can undo the two steps in
//! reverse order. A reference that already contains `_`, or a `-` anywhere
//! other than the range position, does not survive the round trip. That is a
//! known limitation of the filename format and is left as is.

use std::num::ParseIntError;

use thiserror::Error;

use crate::models::{Reference, VerseQuery};

/// Extension appended to every marker filename.
pub const MARKER_SUFFIX: &str = ".jpg";

/// Reasons a raw reference cannot be turned into a query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("range reference \"{reference}\" has no ':' before the hyphen")]
    MissingColon { reference: String },
    #[error("invalid verse number \"{value}\": {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parse a raw reference.
///
/// A hyphen anywhere makes it a range: the part before the first hyphen must
/// end in `CHAP:VERSE`, and the part after it is the closing verse. Without a
/// hyphen the whole trimmed string is the lookup key and is not validated
/// further; a malformed single reference simply finds nothing.
pub fn parse_reference(raw: &str) -> Result<Reference, ParseError> {
    let trimmed = raw.trim();

    let query = match trimmed.split_once('-') {
        Some((left, right)) => {
            let left = left.trim();
            let colon = left.rfind(':').ok_or_else(|| ParseError::MissingColon {
                reference: trimmed.to_string(),
            })?;
            let (chapter_key, start) = left.split_at(colon + 1);
            VerseQuery::Range {
                chapter_key: chapter_key.to_string(),
                start: parse_verse(start)?,
                end: parse_verse(right.trim())?,
            }
        }
        None => VerseQuery::Single {
            key: trimmed.to_string(),
        },
    };

    Ok(Reference {
        raw: trimmed.to_string(),
        query,
    })
}

fn parse_verse(value: &str) -> Result<u32, ParseError> {
    value
        .parse::<u32>()
        .map_err(|source| ParseError::InvalidNumber {
            value: value.to_string(),
            source,
        })
}

/// Build the marker filename for a raw reference.
pub fn encode_marker_name(raw: &str) -> String {
    let escaped = raw.replace('-', "_").replace(':', "-");
    format!("{escaped}{MARKER_SUFFIX}")
}

/// Recover the raw reference from a marker filename produced by
/// [`encode_marker_name`].
pub fn decode_marker_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(MARKER_SUFFIX).unwrap_or(file_name);
    stem.replace('-', ":").replace('_', "-")
}

pub fn is_marker_name(file_name: &str) -> bool {
    file_name.ends_with(MARKER_SUFFIX)
}
