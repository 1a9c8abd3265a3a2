//! Reference dataset parsing
//!
//! Parses text in the Unicode `emoji-test.txt` shape into the set of
//! canonical fully-qualified codepoint sequences. Records look like
//!
//! ```text
//! 263A FE0F ; fully-qualified # ☺️ E0.6 smiling face
//! ```
//!
//! Only lines whose status field says `fully-qualified` contribute a
//! sequence. The 26 regional indicator symbols are appended afterwards; they
//! are valid single-codepoint emoji but carry no record of their own in the
//! test data.

use std::path::Path;

use indexmap::IndexSet;
use thiserror::Error;

/// Bundled copy of the Unicode emoji test data.
pub const BUILTIN_DATASET: &str = include_str!("../../data/emoji-test.txt");

/// Status marker selecting canonical records.
const FULLY_QUALIFIED: &str = "fully-qualified";

/// Failure while building the canonical sequence table. Fatal at startup:
/// classification has no fallback without this table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read emoji dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("emoji dataset line {line}: record has no status field")]
    MissingStatus { line: usize },
    #[error("emoji dataset line {line}: invalid codepoint token `{token}`")]
    InvalidCodepoint { line: usize, token: String },
}

/// Parses `data` and returns the canonical sequences in dataset order,
/// deduplicated, with the regional indicators appended.
pub(crate) fn canonical_sequences(data: &str) -> Result<IndexSet<String>, DatasetError> {
    let mut sequences = IndexSet::new();

    for (idx, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (codepoints, rest) = line
            .split_once(';')
            .ok_or(DatasetError::MissingStatus { line: idx + 1 })?;

        // The status field ends at the trailing comment, if any.
        let status = rest.split('#').next().unwrap_or(rest).trim();
        if !status.contains(FULLY_QUALIFIED) {
            continue;
        }

        let sequence = decode_codepoints(codepoints, idx + 1)?;
        if !sequence.is_empty() {
            sequences.insert(sequence);
        }
    }

    for symbol in '\u{1F1E6}'..='\u{1F1FF}' {
        sequences.insert(symbol.to_string());
    }

    Ok(sequences)
}

/// Reads the dataset from a file on disk.
pub(crate) fn canonical_sequences_from_path(
    path: &Path,
) -> Result<IndexSet<String>, DatasetError> {
    let data = std::fs::read_to_string(path)?;
    canonical_sequences(&data)
}

/// Decodes a whitespace-separated hex codepoint field into one sequence.
fn decode_codepoints(field: &str, line: usize) -> Result<String, DatasetError> {
    let mut sequence = String::new();
    for token in field.split_whitespace() {
        let scalar = u32::from_str_radix(token, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| DatasetError::InvalidCodepoint {
                line,
                token: token.to_string(),
            })?;
        sequence.push(scalar);
    }
    Ok(sequence)
}
