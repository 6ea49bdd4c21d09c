//! # Text positions
//!
//! ## Overview
//!
//! A [Location] is a column and line pair inside of a [Buffer], and a [Range] is a normalized
//! span between two of them.
//!
//! ## Example
//!
//! ```
//! use ry::location::{Location, Range};
//!
//! let a = Location::new(4, 2);
//! let b = Location::new(9, 0);
//! let r = Range::new(a, b);
//!
//! assert_eq!(r.begin(), b);
//! assert_eq!(r.end(), a);
//! ```
use std::cmp::Ordering;

use crate::buffer::Buffer;

/// A position within a buffer.
///
/// Locations are ordered by line first, and then by column.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Location {
    column: usize,
    line: usize,
}

impl Location {
    /// Create a new location.
    pub fn new(column: usize, line: usize) -> Self {
        Location { column, line }
    }

    /// The character index within the line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The line index within the buffer.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Move this location in place.
    pub fn move_to(&mut self, column: usize, line: usize) {
        self.column = column;
        self.line = line;
    }

    /// Compare two locations, first by line and then by column.
    pub fn compare(&self, other: &Location) -> Ordering {
        self.line.cmp(&other.line).then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

/// A span of text between two [Locations](Location).
///
/// The beginning is always ordered before or at the end, regardless of the order the locations
/// were given in. The beginning is inclusive, and the end is exclusive.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Range {
    begin: Location,
    end: Location,
}

impl Range {
    /// Create a new range, normalizing the order of the two locations.
    pub fn new(a: Location, b: Location) -> Self {
        if a <= b {
            Range { begin: a, end: b }
        } else {
            Range { begin: b, end: a }
        }
    }

    /// Where this range begins.
    pub fn begin(&self) -> Location {
        self.begin
    }

    /// Where this range ends.
    pub fn end(&self) -> Location {
        self.end
    }

    /// Iterate over the characters covered by this range within a buffer.
    ///
    /// Line breaks between the spanned lines are produced as `'\n'`. Locations are expected to
    /// already be clamped to the buffer; any part of the range beyond the buffer's content
    /// produces no characters.
    pub fn chars<'a>(&self, buffer: &'a Buffer) -> impl Iterator<Item = char> + 'a {
        let Range { begin, end } = *self;

        (begin.line..=end.line)
            .map_while(move |n| buffer.line(n).map(|text| (n, text)))
            .flat_map(move |(n, text)| {
                let start = if n == begin.line { begin.column } else { 0 };
                let take = if n == end.line {
                    end.column.saturating_sub(start)
                } else {
                    usize::MAX
                };
                let newline = (n != end.line && buffer.line(n + 1).is_some()).then_some('\n');

                text.chars().skip(start).take(take).chain(newline)
            })
    }

    /// The number of characters covered by this range within a buffer.
    pub fn len(&self, buffer: &Buffer) -> usize {
        self.chars(buffer).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    macro_rules! loc {
        ($c: expr, $l: expr) => {
            Location::new($c, $l)
        };
    }

    fn buffer(lines: &[&str]) -> Buffer {
        Buffer::new("test", "/tmp/test", lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_compare() {
        assert_eq!(loc!(0, 0).compare(&loc!(0, 0)), Ordering::Equal);
        assert_eq!(loc!(5, 0).compare(&loc!(0, 1)), Ordering::Less);
        assert_eq!(loc!(0, 1).compare(&loc!(5, 0)), Ordering::Greater);
        assert_eq!(loc!(3, 2).compare(&loc!(4, 2)), Ordering::Less);
        assert!(loc!(9, 1) < loc!(0, 2));
    }

    #[test]
    fn test_move_to() {
        let mut l = loc!(1, 1);
        l.move_to(7, 3);

        assert_eq!(l.column(), 7);
        assert_eq!(l.line(), 3);
    }

    #[test]
    fn test_range_normalize() {
        let r = Range::new(loc!(2, 3), loc!(8, 1));
        assert_eq!(r.begin(), loc!(8, 1));
        assert_eq!(r.end(), loc!(2, 3));

        let r = Range::new(loc!(4, 4), loc!(4, 4));
        assert_eq!(r.begin(), r.end());
    }

    #[test]
    fn test_range_chars_single_line() {
        let b = buffer(&["hello world"]);
        let r = Range::new(loc!(6, 0), loc!(11, 0));

        assert_eq!(r.chars(&b).collect::<String>(), "world");
        assert_eq!(r.len(&b), 5);
    }

    #[test]
    fn test_range_chars_multi_line() {
        let b = buffer(&["abc", "defg", "hij"]);
        let r = Range::new(loc!(1, 2), loc!(1, 0));

        assert_eq!(r.chars(&b).collect::<String>(), "bc\ndefg\nh");
        assert_eq!(r.len(&b), 9);
    }

    #[test]
    fn test_range_chars_empty() {
        let b = buffer(&["abc"]);
        let r = Range::new(loc!(2, 0), loc!(2, 0));

        assert_eq!(r.len(&b), 0);
    }

    #[test]
    fn test_range_chars_recomputed() {
        let mut b = buffer(&["abc"]);
        let r = Range::new(loc!(0, 0), loc!(2, 0));
        assert_eq!(r.chars(&b).collect::<String>(), "ab");

        b.lines_mut()[0] = "xyz".to_string();
        assert_eq!(r.chars(&b).collect::<String>(), "xy");
    }

    #[test]
    fn test_range_chars_past_end() {
        let b = buffer(&["ab"]);
        let r = Range::new(loc!(0, 0), loc!(5, 3));

        assert_eq!(r.chars(&b).collect::<String>(), "ab");
    }

    proptest! {
        #[test]
        fn prop_range_ordered(c1 in 0usize..100, l1 in 0usize..100, c2 in 0usize..100, l2 in 0usize..100) {
            let r = Range::new(loc!(c1, l1), loc!(c2, l2));

            prop_assert!(r.begin() <= r.end());
            prop_assert_eq!(r, Range::new(loc!(c2, l2), loc!(c1, l1)));
        }
    }
}
