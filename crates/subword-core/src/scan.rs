//! Line scanner: the lazy, travel-oriented view of the text ahead of a caret.
//!
//! [`scan_lines`] yields one [`Span`] per line, starting with the caret's own
//! line and moving one line at a time in the travel direction until the
//! document edge:
//!
//! ```text
//! "abcd"        Forward from (0, 2):  (0, "cd") (1, "AB") (2, "12")
//! "AB"
//! "12"          Backward from (0, 3): (0, "cba")
//! ```
//!
//! Backward spans are **reversed**, so the resolver always reads a span from
//! index 0 outward regardless of direction. [`Span::column_at`] maps an index
//! back onto a real column.
//!
//! The scanner is an ordinary [`Iterator`]: dropping it stops the scan, and a
//! new scan is a new call. Nothing past the line the resolver stops on is ever
//! read.

use crate::document::Document;
use crate::position::Position;

/// Travel direction of a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward line end / document end.
    Forward,
    /// Toward line start / document start.
    Backward,
}

/// One line's worth of text, oriented in the travel direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Line number in the document.
    pub line: usize,
    /// Column of the gap the span starts from, in travel order. For forward
    /// spans `text[i]` sits at column `origin + i`; for backward spans it sits
    /// just left of column `origin - i`.
    pub origin: usize,
    /// The characters, in travel order.
    pub text: Vec<char>,
    direction: Direction,
}

impl Span {
    /// The real column reached after stepping over `offset` characters of
    /// this span.
    #[inline]
    #[must_use]
    pub const fn column_at(&self, offset: usize) -> usize {
        match self.direction {
            Direction::Forward => self.origin + offset,
            Direction::Backward => self.origin - offset,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_string(&self) -> String {
        self.text.iter().collect()
    }
}

/// Lazy sequence of [`Span`]s from a start position toward a document edge.
#[derive(Debug)]
pub struct LineScanner<'a, D: Document + ?Sized> {
    doc: &'a D,
    start: Position,
    direction: Direction,
    next_line: Option<usize>,
}

/// Start scanning `doc` from `start` in `direction`.
///
/// A start column past the line end is treated as the line end. A start line
/// past the document end yields nothing.
#[must_use]
pub fn scan_lines<D: Document + ?Sized>(
    doc: &D,
    start: Position,
    direction: Direction,
) -> LineScanner<'_, D> {
    let next_line = (start.line < doc.line_count()).then_some(start.line);
    LineScanner {
        doc,
        start,
        direction,
        next_line,
    }
}

impl<D: Document + ?Sized> Iterator for LineScanner<'_, D> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let line = self.next_line?;
        self.next_line = match self.direction {
            Direction::Forward => Some(line + 1).filter(|&l| l < self.doc.line_count()),
            Direction::Backward => line.checked_sub(1),
        };

        let chars: Vec<char> = self.doc.line_text(line).chars().collect();
        let len = chars.len();
        let is_start = line == self.start.line;
        let col = if is_start { self.start.col.min(len) } else { 0 };

        let span = match self.direction {
            Direction::Forward => Span {
                line,
                origin: col,
                text: chars[col..].to_vec(),
                direction: self.direction,
            },
            Direction::Backward => {
                let end = if is_start { col } else { len };
                Span {
                    line,
                    origin: end,
                    text: chars[..end].iter().rev().copied().collect(),
                    direction: self.direction,
                }
            }
        };
        Some(span)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "abcd\nAB\n12";

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn collect(start: Position, direction: Direction) -> Vec<(usize, String)> {
        scan_lines(DOC, start, direction)
            .map(|span| (span.line, span.as_string()))
            .collect()
    }

    fn s(line: usize, text: &str) -> (usize, String) {
        (line, text.to_string())
    }

    // -- Forward ------------------------------------------------------------

    #[test]
    fn forward_yields_remainder_then_full_lines() {
        assert_eq!(
            collect(p(0, 2), Direction::Forward),
            vec![s(0, "cd"), s(1, "AB"), s(2, "12")]
        );
    }

    #[test]
    fn forward_from_line_end_yields_empty_first_span() {
        assert_eq!(
            collect(p(0, 4), Direction::Forward),
            vec![s(0, ""), s(1, "AB"), s(2, "12")]
        );
    }

    #[test]
    fn forward_from_line_start_yields_whole_line() {
        let first = scan_lines(DOC, p(0, 0), Direction::Forward).next().unwrap();
        assert_eq!(first.as_string(), "abcd");
    }

    #[test]
    fn forward_from_last_line_yields_one_span() {
        assert_eq!(collect(p(2, 1), Direction::Forward), vec![s(2, "2")]);
    }

    // -- Backward -----------------------------------------------------------

    #[test]
    fn backward_reverses_text() {
        assert_eq!(collect(p(0, 3), Direction::Backward), vec![s(0, "cba")]);
    }

    #[test]
    fn backward_edge_cases() {
        let first = scan_lines(DOC, p(0, 4), Direction::Backward).next().unwrap();
        assert_eq!(first.as_string(), "dcba");

        let first = scan_lines(DOC, p(0, 0), Direction::Backward).next().unwrap();
        assert_eq!(first.as_string(), "");
    }

    #[test]
    fn backward_walks_to_first_line() {
        assert_eq!(
            collect(p(2, 1), Direction::Backward),
            vec![s(2, "1"), s(1, "BA"), s(0, "dcba")]
        );
    }

    // -- Columns ------------------------------------------------------------

    #[test]
    fn column_at_undoes_reversal() {
        let mut spans = scan_lines(DOC, p(2, 1), Direction::Backward);
        let first = spans.next().unwrap();
        assert_eq!(first.column_at(1), 0);
        let second = spans.next().unwrap();
        assert_eq!(second.origin, 2);
        assert_eq!(second.column_at(0), 2);
        assert_eq!(second.column_at(second.text.len()), 0);
    }

    #[test]
    fn column_past_line_end_is_clamped() {
        let first = scan_lines(DOC, p(1, 40), Direction::Forward).next().unwrap();
        assert_eq!(first.origin, 2);
        assert!(first.text.is_empty());

        let first = scan_lines(DOC, p(1, 40), Direction::Backward).next().unwrap();
        assert_eq!(first.as_string(), "BA");
    }

    #[test]
    fn line_past_document_end_yields_nothing() {
        assert!(collect(p(7, 0), Direction::Forward).is_empty());
        assert!(collect(p(7, 0), Direction::Backward).is_empty());
    }

    #[test]
    fn each_call_is_independent() {
        let mut a = scan_lines(DOC, p(0, 0), Direction::Forward);
        a.next();
        a.next();
        let b = scan_lines(DOC, p(0, 0), Direction::Forward);
        assert_eq!(b.count(), 3);
        assert_eq!(a.count(), 1);
    }
}
