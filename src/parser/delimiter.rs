//! Delimiter search using memchr

/// Find a single specific delimiter
#[must_use]
pub fn find_byte(haystack: &[u8], needle: u8, start: usize) -> Option<usize> {
    if start >= haystack.len() {
        return None;
    }

    memchr::memchr(needle, &haystack[start..]).map(|pos| start + pos)
}

/// Find any of 2 delimiters
#[must_use]
pub fn find_bytes2(haystack: &[u8], needle1: u8, needle2: u8, start: usize) -> Option<(usize, u8)> {
    if start >= haystack.len() {
        return None;
    }

    memchr::memchr2(needle1, needle2, &haystack[start..])
        .map(|pos| (start + pos, haystack[start + pos]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialized_searches() {
        let input = b"test {nested} string";

        assert_eq!(find_bytes2(input, b'{', b'}', 0), Some((5, b'{')));
        assert_eq!(find_bytes2(input, b'{', b'}', 6), Some((12, b'}')));
        assert_eq!(find_byte(input, b'}', 0), Some(12));
        assert_eq!(find_byte(input, b'}', 13), None);
    }
}
