//! Entry parsing for citation records

use super::utils::backtrack;
use super::{lexer, utils, value, PResult};
use crate::model::{EntryType, Record};
use winnow::prelude::*;

/// An entry as it appears in the source, borrowing from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// Entry type as written
    pub ty: &'a str,
    /// Trimmed citation key
    pub key: &'a str,
    /// Fields in source order
    pub fields: Vec<RawField<'a>>,
}

/// A `name = value` pair as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    /// Field name as written
    pub name: &'a str,
    /// Trimmed value without delimiters
    pub value: &'a str,
}

impl RawEntry<'_> {
    /// Build a record, keeping only known fields. A repeated field keeps its
    /// last value.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.key, EntryType::parse(self.ty));
        let mut year = None;

        for field in &self.fields {
            let owned = Some(field.value.to_owned());
            match field.name.to_ascii_lowercase().as_str() {
                "title" => record.title = field.value.to_owned(),
                "author" => record.author = field.value.to_owned(),
                "year" => year = Some(field.value),
                "publisher" => record.publisher = owned,
                "series" => record.series = owned,
                "isbn" => record.isbn = owned,
                "url" => record.url = owned,
                _ => {}
            }
        }

        record.year = year.map_or(0, value::parse_year);
        record
    }
}

/// Parse one entry starting at its `@`
pub fn parse_entry<'a>(input: &mut &'a str) -> PResult<'a, RawEntry<'a>> {
    utils::literal('@').parse_next(input)?;
    let ty = lexer::word.parse_next(input)?;
    lexer::skip_whitespace(input);
    utils::literal('{').parse_next(input)?;
    let key = lexer::citation_key.parse_next(input)?;
    utils::literal(',').parse_next(input)?;
    let fields = parse_fields.parse_next(input)?;

    Ok(RawEntry { ty, key, fields })
}

/// Parse fields up to and including the entry's closing brace.
///
/// Where no field parses, one stray piece of text is stepped over and the
/// next position is tried, so a field after junk is still found.
fn parse_fields<'a>(input: &mut &'a str) -> PResult<'a, Vec<RawField<'a>>> {
    let mut fields = Vec::new();

    loop {
        lexer::skip_whitespace(input);

        if input.starts_with('}') {
            *input = &input[1..];
            return Ok(fields);
        }
        if input.is_empty() || input.starts_with('@') {
            return backtrack();
        }

        let checkpoint = *input;
        match parse_field(input) {
            Ok(field) => {
                fields.push(field);
                lexer::skip_whitespace(input);
                if input.starts_with(',') {
                    *input = &input[1..];
                }
            }
            Err(_) => {
                *input = checkpoint;
                lexer::skip_stray(input)?;
            }
        }
    }
}

/// Parse a single field (name = value)
fn parse_field<'a>(input: &mut &'a str) -> PResult<'a, RawField<'a>> {
    let name = lexer::word.parse_next(input)?;
    utils::ws('=').parse_next(input)?;
    let value = value::parse_value.parse_next(input)?;

    Ok(RawField { name, value })
}
