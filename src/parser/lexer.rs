//! Lexical analysis for citation entries

use super::utils::backtrack;
use super::{delimiter, PResult};
use winnow::prelude::*;
use winnow::token::take_while;

/// Word characters: ASCII letters, digits and underscore
#[must_use]
pub const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a word (entry types, field names, bare values)
pub fn word<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    take_while(1.., is_word_char).parse_next(input)
}

/// Parse a citation key: everything up to the next comma, trimmed.
///
/// Braces and `@` end the key without a comma, which fails the entry.
pub fn citation_key<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    let raw = take_while(1.., |c: char| !matches!(c, ',' | '{' | '}' | '@')).parse_next(input)?;
    let key = raw.trim();
    if key.is_empty() {
        return backtrack();
    }
    Ok(key)
}

/// Parse a braced value `{ ... }` allowing one level of nested braces.
///
/// Returns the content between the outer braces. A second level of nesting
/// or a missing closing brace is a failure.
pub fn braced_value<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    if !input.starts_with('{') {
        return backtrack();
    }

    let bytes = input.as_bytes();
    let mut nested = false;
    let mut pos = 1;

    while let Some((at, byte)) = delimiter::find_bytes2(bytes, b'{', b'}', pos) {
        if byte == b'{' {
            if nested {
                return backtrack();
            }
            nested = true;
        } else if nested {
            nested = false;
        } else {
            let content = &input[1..at];
            *input = &input[at + 1..];
            return Ok(content);
        }
        pos = at + 1;
    }

    backtrack()
}

/// Parse a quoted string `"..."`; there are no escapes
pub fn quoted_string<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    if !input.starts_with('"') {
        return backtrack();
    }

    match delimiter::find_byte(input.as_bytes(), b'"', 1) {
        Some(end) => {
            let content = &input[1..end];
            *input = &input[end + 1..];
            Ok(content)
        }
        None => backtrack(),
    }
}

/// Step over one piece of text that is not a field, so the caller can try
/// again at the next position: a whole word, a balanced `{...}` group, a
/// quoted string, or a single character.
///
/// Fails only when a brace group runs to the end of input.
pub fn skip_stray<'a>(input: &mut &'a str) -> PResult<'a, ()> {
    let Some(first) = input.chars().next() else {
        return backtrack();
    };

    match first {
        '{' => {
            let bytes = input.as_bytes();
            let mut depth = 0usize;
            let mut pos = 0;
            while let Some((at, byte)) = delimiter::find_bytes2(bytes, b'{', b'}', pos) {
                if byte == b'{' {
                    depth += 1;
                } else {
                    depth -= 1;
                    if depth == 0 {
                        *input = &input[at + 1..];
                        return Ok(());
                    }
                }
                pos = at + 1;
            }
            backtrack()
        }
        '"' => {
            if quoted_string(input).is_err() {
                *input = &input[1..];
            }
            Ok(())
        }
        c if is_word_char(c) => word(input).map(|_| ()),
        c => {
            *input = &input[c.len_utf8()..];
            Ok(())
        }
    }
}

/// Whitespace skipping with an ASCII fast path; full-width and other Unicode
/// spaces count too
pub fn skip_whitespace(input: &mut &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
            b if b.is_ascii() => break,
            _ => match input[pos..].chars().next() {
                Some(c) if c.is_whitespace() => pos += c.len_utf8(),
                _ => break,
            },
        }
    }

    *input = &input[pos..];
}
