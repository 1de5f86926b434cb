use std::io::{self, BufRead};

use tracing::debug;

/// Return the first line that starts with `key` followed by a space,
/// compared case-insensitively. The trailing space keeps `JOH 3:1` from
/// matching `JOH 3:10`. Scanning stops at the first hit.
pub fn find_single<R: BufRead>(reader: R, key: &str) -> io::Result<Option<String>> {
    let prefix = format!("{} ", key.to_lowercase());

    for (index, line) in corpus_lines(reader).enumerate() {
        let line = line?;
        if line.to_lowercase().starts_with(&prefix) {
            debug!(key, line = index + 1, "single verse matched");
            return Ok(Some(line));
        }
    }

    Ok(None)
}

/// Collect every line that mentions `chapter_key` and whose verse number is
/// within `start..=end`, in corpus order. The whole corpus is scanned because
/// nothing guarantees matching lines are contiguous.
pub fn find_range<R: BufRead>(
    reader: R,
    chapter_key: &str,
    start: u32,
    end: u32,
) -> io::Result<Vec<String>> {
    let needle = chapter_key.to_lowercase();
    let mut matches = Vec::new();

    for line in corpus_lines(reader) {
        let line = line?;
        if !line.to_lowercase().contains(&needle) {
            continue;
        }
        if verse_number(&line).is_some_and(|verse| (start..=end).contains(&verse)) {
            matches.push(line);
        }
    }

    debug!(chapter_key, start, end, matched = matches.len(), "verse range scanned");
    Ok(matches)
}

/// Lines of the corpus without their `\n` or `\r\n` terminator. Bytes that
/// are not valid UTF-8 are replaced, so a Latin-1 corpus still scans; only
/// real read failures surface as errors.
fn corpus_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(err) => Some(Err(err)),
        }
    })
}

/// Pull the verse number out of a corpus line: the digits after the colon of
/// the first space-separated token that has one. `None` when there is no such
/// token or it holds no usable number.
pub fn verse_number(line: &str) -> Option<u32> {
    let token = line.split(' ').find(|token| token.contains(':'))?;
    let digits: String = token
        .split(':')
        .nth(1)?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Join range matches with a blank line between entries. `None` when nothing
/// is left after trimming.
pub fn format_range(lines: &[String]) -> Option<String> {
    let joined: String = lines.iter().map(|line| format!("{line}\n\n")).collect();
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn not_found_message(reference: &str) -> String {
    format!("No text found for {reference}")
}
