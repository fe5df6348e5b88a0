//! Range arithmetic used to carry style and entity ranges through edits.

use std::ops::Range;

/// Move `range` across `len` units inserted at `at`.
///
/// Ranges starting at or after the insertion point shift right. A range
/// containing the point grows; one ending exactly at it grows only when
/// `extend_at_end` is set, which is how typed text inherits the style of
/// the character before it.
pub(crate) fn shift_for_insert(
    range: &Range<usize>,
    at: usize,
    len: usize,
    extend_at_end: bool,
) -> Range<usize> {
    if range.start >= at {
        (range.start + len)..(range.end + len)
    } else if range.end > at || (extend_at_end && range.end == at) {
        range.start..(range.end + len)
    } else {
        range.clone()
    }
}

/// What remains of `range` after `deleted` is removed, or `None` when
/// nothing does.
pub(crate) fn shrink_for_delete(
    range: &Range<usize>,
    deleted: &Range<usize>,
) -> Option<Range<usize>> {
    let map = |pos: usize| {
        if pos <= deleted.start {
            pos
        } else if pos >= deleted.end {
            pos - deleted.len()
        } else {
            deleted.start
        }
    };
    let shrunk = map(range.start)..map(range.end);
    (shrunk.start < shrunk.end).then_some(shrunk)
}

/// Parts of `range` not covered by `cut`.
pub(crate) fn subtract(range: &Range<usize>, cut: &Range<usize>) -> Vec<Range<usize>> {
    if cut.end <= range.start || cut.start >= range.end {
        return vec![range.clone()];
    }
    let mut parts = Vec::with_capacity(2);
    if range.start < cut.start {
        parts.push(range.start..cut.start);
    }
    if cut.end < range.end {
        parts.push(cut.end..range.end);
    }
    parts
}

/// Overlap of two ranges, if non-empty.
pub(crate) fn intersect(a: &Range<usize>, b: &Range<usize>) -> Option<Range<usize>> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (start < end).then_some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2..5, 0, 3, true, 5..8)]
    #[case(2..5, 2, 3, true, 5..8)]
    #[case(2..5, 3, 3, true, 2..8)]
    #[case(2..5, 5, 3, true, 2..8)]
    #[case(2..5, 5, 3, false, 2..5)]
    #[case(2..5, 6, 3, true, 2..5)]
    fn test_shift_for_insert(
        #[case] range: Range<usize>,
        #[case] at: usize,
        #[case] len: usize,
        #[case] extend: bool,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(shift_for_insert(&range, at, len, extend), expected);
    }

    #[rstest]
    #[case(5..10, 0..2, Some(3..8))]
    #[case(5..10, 10..12, Some(5..10))]
    #[case(5..10, 3..7, Some(3..6))]
    #[case(5..10, 7..12, Some(5..7))]
    #[case(5..10, 6..8, Some(5..8))]
    #[case(5..10, 4..11, None)]
    #[case(5..10, 5..10, None)]
    fn test_shrink_for_delete(
        #[case] range: Range<usize>,
        #[case] deleted: Range<usize>,
        #[case] expected: Option<Range<usize>>,
    ) {
        assert_eq!(shrink_for_delete(&range, &deleted), expected);
    }

    #[rstest]
    #[case(0..10, 3..5, vec![0..3, 5..10])]
    #[case(0..10, 0..5, vec![5..10])]
    #[case(0..10, 5..12, vec![0..5])]
    #[case(0..10, 0..10, vec![])]
    #[case(0..10, 10..12, vec![0..10])]
    fn test_subtract(
        #[case] range: Range<usize>,
        #[case] cut: Range<usize>,
        #[case] expected: Vec<Range<usize>>,
    ) {
        assert_eq!(subtract(&range, &cut), expected);
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(&(0..5), &(3..9)), Some(3..5));
        assert_eq!(intersect(&(0..3), &(3..9)), None);
    }
}
