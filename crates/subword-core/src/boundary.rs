//! Boundary resolver. Decides where a sub-word motion lands.
//!
//! [`find_boundary`] drives the [line scanner](crate::scan) and the
//! [classifier](crate::class) to find the next stop in one direction:
//!
//! 1. **Current line.** Skip the run the caret is in and stop where the class
//!    changes. Two refinements make camelCase and CONSTANT_CASE feel right:
//!    - going forward, when the first character is a one-character run
//!      (`|Bar`, `|_SOME`), hop over it and the run that follows it, landing
//!      on `Bar|` rather than `B|ar`;
//!    - going backward, a run of lowercase preceded by a capital takes the
//!      capital with it (`thisIs|` lands on `this|Is`, not `thisI|s`).
//!
//!    No class change before the line edge means the line edge is the stop.
//! 2. **Later lines.** When the caret already sits on the line edge, skip
//!    blank and whitespace-only lines and land next to the first
//!    non-whitespace character of the next line that has one.
//! 3. **Fallback.** Nothing left but whitespace: document end going forward,
//!    `(0, 0)` going backward.
//!
//! Digit runs split on `.` like any other punctuation, so `123.456` is three
//! stops, not one.

use crate::class::{CharClass, classify, classify_opt};
use crate::document::Document;
use crate::position::Position;
use crate::scan::{Direction, scan_lines};

/// Find the next sub-word boundary from `pos` in `direction`.
///
/// Always returns a position inside the document. Out-of-range input is
/// clamped: a column past the line end counts as the line end, and a line past
/// the document end resolves to the document edge in `direction`.
#[must_use]
pub fn find_boundary<D: Document + ?Sized>(doc: &D, pos: Position, direction: Direction) -> Position {
    let mut spans = scan_lines(doc, pos, direction);

    if let Some(first) = spans.next() {
        if let Some(offset) = first_line_offset(&first.text, direction) {
            let found = Position::new(first.line, first.column_at(offset));
            tracing::trace!(?direction, from = ?pos, to = ?found, "boundary on current line");
            return found;
        }
    }

    for span in spans {
        if let Some(offset) = first_outside(&span.text, CharClass::Whitespace) {
            let found = Position::new(span.line, span.column_at(offset));
            tracing::trace!(?direction, from = ?pos, to = ?found, "boundary on later line");
            return found;
        }
    }

    let edge = match direction {
        Direction::Forward => doc.end(),
        Direction::Backward => Position::ZERO,
    };
    tracing::trace!(?direction, from = ?pos, to = ?edge, "boundary at document edge");
    edge
}

/// Offset into the caret's own (travel-oriented) span where the motion
/// stops. `None` only for an empty span, i.e. the caret is on the line edge.
fn first_line_offset(ahead: &[char], direction: Direction) -> Option<usize> {
    if ahead.is_empty() {
        return None;
    }
    let found = match direction {
        Direction::Forward => forward_offset(ahead),
        Direction::Backward => backward_offset(ahead),
    };
    Some(found.unwrap_or(ahead.len()))
}

fn forward_offset(ahead: &[char]) -> Option<usize> {
    let cur = classify(ahead[0]);
    let next = classify_opt(ahead.get(1).copied());

    if next != cur && !cur.is_whitespace() && !next.is_whitespace() {
        // One-character run at the caret: step over it and measure the run
        // after it instead.
        return first_outside(&ahead[1..], next).map(|i| i + 1);
    }
    first_outside(ahead, cur)
}

fn backward_offset(ahead: &[char]) -> Option<usize> {
    let cur = classify(ahead[0]);
    let mut found = first_outside(ahead, cur)?;

    // Reversed text: an uppercase right after lowercase is the capital that
    // starts the word we just crossed.
    if classify(ahead[found]) == CharClass::Upper && classify(ahead[found - 1]) == CharClass::Lower {
        found += 1;
    }
    Some(found)
}

/// Index of the first character not in `class`.
fn first_outside(text: &[char], class: CharClass) -> Option<usize> {
    text.iter().position(|&ch| classify(ch) != class)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
