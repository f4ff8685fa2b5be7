//! Selection markup: a document and its selections written as one string.
//!
//! ```text
//! thisIs^ACamel[Case}Word
//! ```
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `^` | a caret (collapsed selection) |
//! | `[` ... `}` | a range with the anchor at the start, active end at the end |
//! | `{` ... `]` | a range with the active end at the start, anchor at the end |
//! | `\x` | the literal character `x` |
//!
//! Square brackets always sit on the anchor side, braces on the active side.
//! Columns follow the same line-ending rules as [`Buffer`](crate::buffer::Buffer).

use ropey::Rope;
use thiserror::Error;

use crate::buffer::Buffer;
use crate::document::Document;
use crate::position::Position;
use crate::selection::Selection;

const CARET: char = '^';
const ANCHOR_OPEN: char = '[';
const ANCHOR_CLOSE: char = ']';
const ACTIVE_OPEN: char = '{';
const ACTIVE_CLOSE: char = '}';
const ESCAPE: char = '\\';

/// Malformed markup. `at` is a char index into the marked-up input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("closing `{marker}` at {at} has no opening marker")]
    UnexpectedClose { marker: char, at: usize },

    #[error("`{open}` is closed by `{found}` at {at}, expected `{expected}`")]
    MismatchedClose {
        open: char,
        expected: char,
        found: char,
        at: usize,
    },

    #[error("`{marker}` at {at} opens a range inside another range")]
    Nested { marker: char, at: usize },

    #[error("range opened by `{marker}` at {at} is never closed")]
    Unterminated { marker: char, at: usize },

    #[error("input ends with an unfinished `\\` escape")]
    DanglingEscape,

    #[error("no selection markers found")]
    NoSelections,
}

/// A range whose closing marker has not been seen yet.
#[derive(Clone, Copy)]
struct OpenRange {
    marker: char,
    at: usize,
    offset: usize,
    slot: usize,
}

/// Char offsets of a selection's two ends in the plain text.
#[derive(Clone, Copy)]
struct Marks {
    anchor: usize,
    active: usize,
}

const fn closer_for(open: char) -> char {
    if open == ANCHOR_OPEN {
        ACTIVE_CLOSE
    } else {
        ANCHOR_CLOSE
    }
}

const fn is_marker(ch: char) -> bool {
    matches!(
        ch,
        CARET | ANCHOR_OPEN | ANCHOR_CLOSE | ACTIVE_OPEN | ACTIVE_CLOSE | ESCAPE
    )
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split marked-up text into the plain text and its selections, in the order
/// their first marker appears.
///
/// # Errors
///
/// A [`MarkupError`] if a range is nested, unbalanced or closed with the
/// wrong bracket kind, if the input ends mid-escape, or if it carries no
/// selection at all.
pub fn parse(marked: &str) -> Result<(String, Vec<Selection>), MarkupError> {
    let mut text = String::with_capacity(marked.len());
    let mut offset = 0;
    let mut marks: Vec<Marks> = Vec::new();
    let mut open: Option<OpenRange> = None;

    let mut chars = marked.chars().enumerate();
    while let Some((at, ch)) = chars.next() {
        match ch {
            ESCAPE => {
                let Some((_, literal)) = chars.next() else {
                    return Err(MarkupError::DanglingEscape);
                };
                text.push(literal);
                offset += 1;
            }
            CARET => marks.push(Marks {
                anchor: offset,
                active: offset,
            }),
            ANCHOR_OPEN | ACTIVE_OPEN => {
                if open.is_some() {
                    return Err(MarkupError::Nested { marker: ch, at });
                }
                open = Some(OpenRange {
                    marker: ch,
                    at,
                    offset,
                    slot: marks.len(),
                });
                marks.push(Marks {
                    anchor: offset,
                    active: offset,
                });
            }
            ANCHOR_CLOSE | ACTIVE_CLOSE => {
                let Some(range) = open.take() else {
                    return Err(MarkupError::UnexpectedClose { marker: ch, at });
                };
                let expected = closer_for(range.marker);
                if ch != expected {
                    return Err(MarkupError::MismatchedClose {
                        open: range.marker,
                        expected,
                        found: ch,
                        at,
                    });
                }
                marks[range.slot] = if range.marker == ANCHOR_OPEN {
                    Marks {
                        anchor: range.offset,
                        active: offset,
                    }
                } else {
                    Marks {
                        anchor: offset,
                        active: range.offset,
                    }
                };
            }
            _ => {
                text.push(ch);
                offset += 1;
            }
        }
    }

    if let Some(range) = open {
        return Err(MarkupError::Unterminated {
            marker: range.marker,
            at: range.at,
        });
    }
    if marks.is_empty() {
        return Err(MarkupError::NoSelections);
    }

    let rope = Rope::from_str(&text);
    let selections = marks
        .iter()
        .map(|m| Selection::new(position_at(&rope, m.anchor), position_at(&rope, m.active)))
        .collect();
    Ok((text, selections))
}

/// `offset` must not exceed `rope.len_chars()`.
fn position_at(rope: &Rope, offset: usize) -> Position {
    let line = rope.char_to_line(offset);
    Position::new(line, offset - rope.line_to_char(line))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Where a marker goes and how it sorts against others at the same offset:
/// closing markers, then carets, then opening markers, each group in
/// selection order.
#[derive(Clone, Copy)]
struct Placed {
    offset: usize,
    rank: u8,
    index: usize,
    marker: char,
}

/// Write `text` with `selections` marked in it. Literal marker characters in
/// `text` are escaped. Positions past the end of a line are drawn at the line
/// end; lines past the end of the text at the text end.
#[must_use]
pub fn render(text: &str, selections: &[Selection]) -> String {
    let buffer = Buffer::from_text(text);
    render_buffer(&buffer, selections)
}

/// [`render`] for text already held in a [`Buffer`].
#[must_use]
pub fn render_buffer(buffer: &Buffer, selections: &[Selection]) -> String {
    let offset = |pos: Position| clamped_char_idx(buffer, pos);

    let mut placed = Vec::with_capacity(selections.len() * 2);
    for (index, sel) in selections.iter().enumerate() {
        if sel.is_empty() {
            placed.push(Placed {
                offset: offset(sel.active),
                rank: 1,
                index,
                marker: CARET,
            });
            continue;
        }
        let range = sel.range();
        let (opener, closer) = if sel.is_reversed() {
            (ACTIVE_OPEN, ANCHOR_CLOSE)
        } else {
            (ANCHOR_OPEN, ACTIVE_CLOSE)
        };
        placed.push(Placed {
            offset: offset(range.start),
            rank: 2,
            index,
            marker: opener,
        });
        placed.push(Placed {
            offset: offset(range.end),
            rank: 0,
            index,
            marker: closer,
        });
    }
    placed.sort_by_key(|p| (p.offset, p.rank, p.index));

    let mut out = String::with_capacity(buffer.len_chars() + placed.len() * 2);
    let mut pending = placed.iter().peekable();
    for (idx, ch) in buffer.rope().chars().enumerate() {
        while let Some(p) = pending.next_if(|p| p.offset <= idx) {
            out.push(p.marker);
        }
        if is_marker(ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out.extend(pending.map(|p| p.marker));
    out
}

fn clamped_char_idx(buffer: &Buffer, pos: Position) -> usize {
    let last = buffer.line_count().saturating_sub(1);
    if pos.line > last {
        return buffer.len_chars();
    }
    let col = pos.col.min(buffer.line_content_len(pos.line).unwrap_or(0));
    buffer
        .pos_to_char_idx(Position::new(pos.line, col))
        .unwrap_or_else(|| buffer.len_chars())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
