//! Value parsing for citation fields

use super::{lexer, PResult};
use winnow::combinator::alt;
use winnow::prelude::*;

/// Parse a field value: braced, quoted, or a bare word. The result is trimmed.
pub fn parse_value<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    alt((lexer::braced_value, lexer::quoted_string, lexer::word))
        .map(str::trim)
        .parse_next(input)
}

/// Read a year the lenient way: optional sign, then leading decimal digits.
/// Anything else, or overflow, gives 0.
#[must_use]
pub fn parse_year(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i32>() {
        Ok(year) if negative => -year,
        Ok(year) => year,
        Err(_) => 0,
    }
}
