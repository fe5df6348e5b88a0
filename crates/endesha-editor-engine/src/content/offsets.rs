//! Offset conversion between UTF-16 code units and UTF-8 byte positions.
//!
//! Stored answer content measures every offset and length in UTF-16 code
//! units, while Rust strings are indexed by byte. Everything that slices
//! block text goes through these helpers.

use std::ops::Range;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte position of the UTF-16 `offset` in `text`.
///
/// Returns `None` when the offset lies past the end of the text or inside
/// a surrogate pair.
pub fn byte_offset(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if units == offset {
            return Some(idx);
        }
        units += ch.len_utf16();
        if units > offset {
            return None;
        }
    }
    (units == offset).then_some(text.len())
}

/// Byte range for a UTF-16 range, see [`byte_offset`].
pub fn byte_range(text: &str, range: &Range<usize>) -> Option<Range<usize>> {
    Some(byte_offset(text, range.start)?..byte_offset(text, range.end)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("Hello", 5)]
    #[case("habari yako", 11)]
    #[case("a😀b", 4)]
    #[case("é", 1)]
    fn test_utf16_len(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(utf16_len(text), expected);
    }

    #[rstest]
    #[case("Hello", 0, Some(0))]
    #[case("Hello", 5, Some(5))]
    #[case("Hello", 6, None)]
    #[case("a😀b", 1, Some(1))]
    #[case("a😀b", 2, None)]
    #[case("a😀b", 3, Some(5))]
    #[case("a😀b", 4, Some(6))]
    #[case("éa", 1, Some(2))]
    #[case("", 0, Some(0))]
    fn test_byte_offset(#[case] text: &str, #[case] offset: usize, #[case] expected: Option<usize>) {
        assert_eq!(byte_offset(text, offset), expected);
    }

    #[test]
    fn test_byte_range_rejects_split_surrogate() {
        assert_eq!(byte_range("a😀b", &(0..3)), Some(0..5));
        assert_eq!(byte_range("a😀b", &(0..2)), None);
    }
}
