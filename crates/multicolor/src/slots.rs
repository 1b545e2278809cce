//! Target spans for gradient application.

use std::ops::Range;

use ansistring::{words, AnsiString};

/// One addressable region of text: a single range or a group of ranges
/// styled together by one gradient step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot(Vec<Range<usize>>);

impl Slot {
    /// A slot covering a group of ranges.
    pub fn new(ranges: Vec<Range<usize>>) -> Self {
        Self(ranges)
    }

    /// The ranges this slot styles together.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.0
    }
}

impl From<Range<usize>> for Slot {
    fn from(range: Range<usize>) -> Self {
        Self(vec![range])
    }
}

/// One slot per character position.
pub fn per_char(len: usize) -> Vec<Slot> {
    (0..len).map(|index| Slot::from(index..index + 1)).collect()
}

/// One slot per non-whitespace character position, so a gradient flows
/// across the visible characters of a multi-line value.
pub fn visible(text: &AnsiString) -> Vec<Slot> {
    text.plain()
        .chars()
        .enumerate()
        .filter(|(_, c)| !words::is_whitespace(*c))
        .map(|(index, _)| Slot::from(index..index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_char_covers_every_position() {
        let slots = per_char(3);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].ranges(), &[2..3]);
    }

    #[test]
    fn visible_skips_whitespace() {
        let text = AnsiString::new("a b\nc");
        let slots = visible(&text);
        assert_eq!(
            slots,
            vec![Slot::from(0..1), Slot::from(2..3), Slot::from(4..5)]
        );
    }

    #[test]
    fn grouped_ranges() {
        let slot = Slot::new(vec![0..2, 5..7]);
        assert_eq!(slot.ranges().len(), 2);
    }
}
