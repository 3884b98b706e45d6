//! Parser utilities

use super::PResult;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Make a parser insensitive to surrounding whitespace, Unicode spaces included
pub fn ws<'a, F, O>(mut parser: F) -> impl Parser<&'a str, O, ContextError>
where
    F: Parser<&'a str, O, ContextError>,
{
    move |input: &mut &'a str| {
        let _ = spaces.parse_next(input)?;
        let output = parser.parse_next(input)?;
        let _ = spaces.parse_next(input)?;
        Ok(output)
    }
}

/// Any run of whitespace, possibly empty
pub fn spaces<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

/// Match one literal character
pub fn literal<'a>(c: char) -> impl Parser<&'a str, char, ContextError> {
    c
}

/// A recoverable failure: the caller may try something else
pub fn backtrack<'a, O>() -> PResult<'a, O> {
    Err(ErrMode::Backtrack(ContextError::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws() {
        let mut input = "  =  {value}";
        let mut parser = ws('=');
        let result = parser.parse_next(&mut input).unwrap();
        assert_eq!(result, '=');
        assert_eq!(input, "{value}");
    }

    #[test]
    fn test_ws_full_width_space() {
        let mut input = "\u{3000}=\u{3000}{value}";
        assert_eq!(ws('=').parse_next(&mut input).unwrap(), '=');
        assert_eq!(input, "{value}");
    }

    #[test]
    fn test_backtrack_is_recoverable() {
        let result: PResult<'_, ()> = backtrack();
        assert!(matches!(result, Err(ErrMode::Backtrack(_))));
    }
}
