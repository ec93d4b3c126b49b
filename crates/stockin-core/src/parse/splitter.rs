//! Delimiter sniffing and field splitting.

use tracing::trace;

use super::patterns::{SPACE_RUN, TAB_RUN};

const BOM: char = '\u{feff}';

/// Field separator style detected on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// One or more tab characters.
    Tab,
    /// Semicolons, with `"` quoting.
    Semicolon,
    /// Two or more consecutive spaces.
    Spaces,
}

impl Delimiter {
    /// Detect the separator style of a line. Tabs win over semicolons.
    pub fn detect(line: &str) -> Self {
        if line.contains('\t') {
            Delimiter::Tab
        } else if line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Spaces
        }
    }
}

/// Split a raw line into trimmed fields according to its detected delimiter.
///
/// Never fails: a line that cannot be split yields a short (or empty) vector
/// and the caller decides whether that is enough.
pub fn split_fields(line: &str) -> Vec<String> {
    let line = line.strip_prefix(BOM).unwrap_or(line).trim();
    if line.is_empty() {
        return Vec::new();
    }

    let delimiter = Delimiter::detect(line);
    trace!(?delimiter, "splitting line");

    match delimiter {
        Delimiter::Tab => split_on(&TAB_RUN, line),
        Delimiter::Semicolon => split_semicolon(line),
        Delimiter::Spaces => split_on(&SPACE_RUN, line),
    }
}

fn split_on(pattern: &regex::Regex, line: &str) -> Vec<String> {
    pattern
        .split(line)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_semicolon(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(|f| f.trim().to_string()).collect(),
        // Fall back to a plain split if the CSV reader rejects the line
        _ => line.split(';').map(|f| f.trim().to_string()).collect(),
    }
}
