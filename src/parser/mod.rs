//! Citation-file parser implementation using winnow
//!
//! The parser is best-effort: it scans for `@` and tries to read an entry
//! there. Whatever does not parse is skipped and never reported as an error.

pub mod delimiter;
pub mod entry;
pub mod lexer;
pub mod utils;
pub mod value;

use crate::error::Location;
use crate::model::Record;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use entry::{parse_entry, RawEntry, RawField};

/// Internal parser result type
pub type PResult<'a, O> = winnow::PResult<O, winnow::error::ContextError>;

/// What to do when a citation key appears more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeys {
    /// The later entry replaces the earlier one, at the earlier position
    #[default]
    LastWins,
    /// Every occurrence is kept, in source order
    KeepAll,
}

/// Result of scanning a citation file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan<'a> {
    /// Entries that parsed, in source order
    pub entries: Vec<RawEntry<'a>>,
    /// Where each skipped `@` was found
    pub skipped: Vec<Location>,
}

/// Scan a whole citation file
#[must_use]
pub fn scan(input: &str) -> Scan<'_> {
    let bytes = input.as_bytes();
    let mut result = Scan::default();
    let mut pos = 0;

    while let Some(at) = delimiter::find_byte(bytes, b'@', pos) {
        let mut remaining = &input[at..];
        match parse_entry(&mut remaining) {
            Ok(entry) => {
                result.entries.push(entry);
                pos = input.len() - remaining.len();
            }
            Err(_) => {
                let location = Location::of_offset(input, at);
                debug!(%location, "skipping unparseable citation entry");
                result.skipped.push(location);
                pos = at + 1;
            }
        }
    }

    result
}

/// Parse records with the default duplicate-key policy
#[must_use]
pub fn parse(input: &str) -> Vec<Record> {
    parse_with(input, DuplicateKeys::default())
}

/// Parse records, resolving repeated keys with `duplicates`
#[must_use]
pub fn parse_with(input: &str, duplicates: DuplicateKeys) -> Vec<Record> {
    to_records(&scan(input).entries, duplicates)
}

/// Build records from scanned entries, resolving repeated keys with `duplicates`
#[must_use]
pub fn to_records(entries: &[RawEntry<'_>], duplicates: DuplicateKeys) -> Vec<Record> {
    match duplicates {
        DuplicateKeys::KeepAll => entries.iter().map(RawEntry::to_record).collect(),
        DuplicateKeys::LastWins => {
            let mut positions: AHashMap<&str, usize> = AHashMap::new();
            let mut records: Vec<Record> = Vec::with_capacity(entries.len());
            for entry in entries {
                if let Some(&index) = positions.get(entry.key) {
                    warn!(key = entry.key, "duplicate citation key, keeping the last occurrence");
                    records[index] = entry.to_record();
                } else {
                    positions.insert(entry.key, records.len());
                    records.push(entry.to_record());
                }
            }
            records
        }
    }
}
