//! Display formatting for author names
//!
//! Records keep authors as written in the citation file, `"Family, Given"`.
//! Pages show them in reading order, which depends on the name's language.

use std::borrow::Cow;

/// Name order used when displaying an author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    /// `"Given Family"`
    GivenFirst,
    /// `"FamilyGiven"`, no separator
    FamilyFirst,
}

impl NameOrder {
    /// Pick the order for `raw`, honoring a language override when present
    #[must_use]
    pub fn detect(raw: &str, language: Option<&str>) -> Self {
        let japanese = match language {
            Some(language) => language.eq_ignore_ascii_case("japanese"),
            None => raw.chars().any(is_japanese),
        };
        if japanese {
            Self::FamilyFirst
        } else {
            Self::GivenFirst
        }
    }
}

/// Hiragana, Katakana or CJK unified ideograph
#[must_use]
pub const fn is_japanese(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

/// Format an author for display.
///
/// Anything that does not split into exactly two comma-separated parts is
/// returned unchanged.
///
/// ```
/// use bibshelf::format::format_author;
///
/// assert_eq!(format_author("Smith, John", None), "John Smith");
/// assert_eq!(format_author("諏訪, 正樹", None), "諏訪正樹");
/// assert_eq!(format_author("Plato", None), "Plato");
/// ```
#[must_use]
pub fn format_author<'a>(raw: &'a str, language: Option<&str>) -> Cow<'a, str> {
    let mut parts = raw.split(',').map(str::trim);
    let (Some(family), Some(given), None) = (parts.next(), parts.next(), parts.next()) else {
        return Cow::Borrowed(raw);
    };

    match NameOrder::detect(raw, language) {
        NameOrder::FamilyFirst => Cow::Owned(format!("{family}{given}")),
        NameOrder::GivenFirst => Cow::Owned(format!("{given} {family}")),
    }
}
