//! The read-only document view the navigation core works against.
//!
//! The core never stores or mutates text. It only asks a [`Document`] how many
//! lines it has and what a given line says. [`Buffer`](crate::buffer::Buffer)
//! is the in-crate implementation; plain line slices and `str` implement it
//! too, which keeps tests and small integrations free of any rope.

use std::borrow::Cow;

use crate::position::Position;

/// Line-oriented read access to a text document.
///
/// Lines are 0-indexed and returned **without** their line ending. A document
/// always has at least one (possibly empty) line.
pub trait Document {
    /// Number of lines. Never zero.
    fn line_count(&self) -> usize;

    /// Content of `line` without its line ending. Lines past the end read as
    /// empty.
    fn line_text(&self, line: usize) -> Cow<'_, str>;

    /// Length of `line` in chars.
    fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    /// The last valid caret position, `(lastLine, lastLineLength)`.
    fn end(&self) -> Position {
        let last = self.line_count().saturating_sub(1);
        Position::new(last, self.line_len(last))
    }
}

impl<S: AsRef<str>> Document for [S] {
    fn line_count(&self) -> usize {
        self.len().max(1)
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.get(line)
            .map_or(Cow::Borrowed(""), |l| Cow::Borrowed(l.as_ref()))
    }
}

/// Lines are split on `\n`; a `\r` right before it belongs to the line ending.
/// A trailing `\n` starts one more, empty line, the way editors show it.
///
/// Every call re-splits the string from the top, so a scan across many lines
/// costs time quadratic in the line count. Meant for short literals in tests
/// and one-off calls; use [`Buffer`](crate::buffer::Buffer) or a slice of
/// lines for anything long.
impl Document for str {
    fn line_count(&self) -> usize {
        self.split('\n').count()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        let text = self.split('\n').nth(line).unwrap_or("");
        Cow::Borrowed(text.strip_suffix('\r').unwrap_or(text))
    }
}
