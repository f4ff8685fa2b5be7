//! Rope-backed text buffer the commands read from and edit.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with the small API the navigation core
//! and the editor need: line access as a [`Document`], coordinate conversion
//! from `Position` (line, col) to rope char indices, and fallible
//! insert/delete for applying and undoing batched deletions.
//!
//! Columns are char offsets, never byte offsets. Line endings (`\n`, `\r\n`,
//! `\r`) are part of the rope but never part of a line's content.

use std::borrow::Cow;
use std::fmt;

use ropey::{Rope, RopeSlice};
use thiserror::Error;

use crate::document::Document;
use crate::position::{Position, Range};

/// An edit addressed a position outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("position {pos} is outside the buffer")]
    OutOfBounds { pos: Position },
}

/// A text buffer backed by a rope.
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    // -- Text access --------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// A line including its line ending, or `None` past the last line.
    #[inline]
    fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.rope.len_lines()).then(|| self.rope.line(line))
    }

    /// Number of chars in a line **excluding** its line ending. This is also
    /// the largest valid caret column on that line.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|rope_line| {
            let total = rope_line.len_chars();
            if total == 0 {
                return 0;
            }
            match rope_line.char(total - 1) {
                '\n' if total >= 2 && rope_line.char(total - 2) == '\r' => total - 2,
                '\n' | '\r' => total - 1,
                _ => total,
            }
        })
    }

    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Convert a `Position` to an absolute char index.
    ///
    /// A column equal to the line's full char count (line ending included) is
    /// accepted; anything past it is `None`.
    #[must_use]
    pub fn pos_to_char_idx(&self, pos: Position) -> Option<usize> {
        let line = self.line(pos.line)?;
        if pos.col > line.len_chars() {
            return None;
        }
        Some(self.rope.line_to_char(pos.line) + pos.col)
    }

    // -- Editing ------------------------------------------------------------

    /// Check that both ends of `range` are buffer positions, without editing.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] naming the first endpoint that is not.
    pub fn check_range(&self, range: Range) -> Result<(), EditError> {
        self.char_idx(range.start)?;
        self.char_idx(range.end)?;
        Ok(())
    }

    /// Insert `text` at `pos`.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if `pos` is not a valid buffer position.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<(), EditError> {
        let idx = self.char_idx(pos)?;
        self.rope.insert(idx, text);
        Ok(())
    }

    /// Delete the text in `range` and return it. An empty range deletes
    /// nothing and returns an empty string.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if either endpoint is not a valid buffer
    /// position. The buffer is left untouched.
    pub fn delete(&mut self, range: Range) -> Result<String, EditError> {
        let start = self.char_idx(range.start)?;
        let end = self.char_idx(range.end)?;
        if start == end {
            return Ok(String::new());
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        Ok(removed)
    }

    fn char_idx(&self, pos: Position) -> Result<usize, EditError> {
        self.pos_to_char_idx(pos)
            .ok_or(EditError::OutOfBounds { pos })
    }
}

impl Document for Buffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        let Some(len) = self.line_content_len(line) else {
            return Cow::Borrowed("");
        };
        let content = self.rope.line(line).slice(..len);
        content
            .as_str()
            .map_or_else(|| Cow::Owned(content.to_string()), Cow::Borrowed)
    }

    fn line_len(&self, line: usize) -> usize {
        self.line_content_len(line).unwrap_or(0)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.rope.len_lines())
            .field("chars", &self.len_chars())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn empty_text_has_one_line() {
        let buf = Buffer::from_text("");
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.end(), p(0, 0));
    }

    #[test]
    fn from_text_counts_trailing_empty_line() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.len_chars(), 12);
        assert_eq!(buf.line_count(), 3);
    }

    // -- Line content -------------------------------------------------------

    #[test]
    fn line_content_len_strips_every_ending() {
        let buf = Buffer::from_text("lf\ncrlf\r\ncr\rlast");
        assert_eq!(buf.line_content_len(0), Some(2));
        assert_eq!(buf.line_content_len(1), Some(4));
        assert_eq!(buf.line_content_len(2), Some(2));
        assert_eq!(buf.line_content_len(3), Some(4));
        assert_eq!(buf.line_content_len(4), None);
    }

    #[test]
    fn document_line_text_has_no_ending() {
        let buf = Buffer::from_text("fancyWhitespaceTest file\r\n\n\taaa");
        assert_eq!(buf.line_text(0), "fancyWhitespaceTest file");
        assert_eq!(buf.line_text(1), "");
        assert_eq!(buf.line_text(2), "\taaa");
        assert_eq!(buf.line_text(3), "");
        assert_eq!(Document::line_len(&buf, 0), 24);
    }

    #[test]
    fn document_end_is_last_line_length() {
        let buf = Buffer::from_text("abc\nwłaściwie");
        assert_eq!(buf.end(), p(1, 9));
    }

    // -- Coordinate conversion ----------------------------------------------

    #[test]
    fn pos_to_char_idx_counts_line_endings() {
        let buf = Buffer::from_text("ab\r\ncd\n");
        assert_eq!(buf.pos_to_char_idx(p(0, 0)), Some(0));
        assert_eq!(buf.pos_to_char_idx(p(0, 4)), Some(4));
        assert_eq!(buf.pos_to_char_idx(p(1, 1)), Some(5));
        assert_eq!(buf.pos_to_char_idx(p(2, 0)), Some(7));
        assert_eq!(buf.pos_to_char_idx(p(0, 5)), None);
        assert_eq!(buf.pos_to_char_idx(p(3, 0)), None);
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn delete_returns_removed_text() {
        let mut buf = Buffer::from_text("thisIsACamelCaseWord");
        let removed = buf.delete(Range::new(p(0, 12), p(0, 16))).unwrap();
        assert_eq!(removed, "Case");
        assert_eq!(buf.contents(), "thisIsACamelWord");
    }

    #[test]
    fn delete_across_lines_joins_them() {
        let mut buf = Buffer::from_text("ab\n\n  cd");
        let removed = buf.delete(Range::new(p(0, 2), p(2, 2))).unwrap();
        assert_eq!(removed, "\n\n  ");
        assert_eq!(buf.contents(), "abcd");
    }

    #[test]
    fn delete_empty_range_is_noop() {
        let mut buf = Buffer::from_text("abc");
        assert_eq!(buf.delete(Range::new(p(0, 1), p(0, 1))).unwrap(), "");
        assert_eq!(buf.contents(), "abc");
    }

    #[test]
    fn delete_out_of_bounds_is_an_error() {
        let mut buf = Buffer::from_text("abc");
        assert_eq!(
            buf.delete(Range::new(p(0, 1), p(3, 0))),
            Err(EditError::OutOfBounds { pos: p(3, 0) })
        );
        assert_eq!(buf.contents(), "abc");
    }

    #[test]
    fn check_range_names_the_bad_endpoint() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(buf.check_range(Range::new(p(0, 1), p(1, 3))), Ok(()));
        assert_eq!(
            buf.check_range(Range::new(p(0, 9), p(1, 0))),
            Err(EditError::OutOfBounds { pos: p(0, 9) })
        );
        assert_eq!(
            buf.check_range(Range::new(p(1, 0), p(4, 0))),
            Err(EditError::OutOfBounds { pos: p(4, 0) })
        );
    }

    #[test]
    fn insert_restores_deleted_text() {
        let mut buf = Buffer::from_text("thisIsA\nlCaseWord");
        buf.insert(p(0, 7), "Came").unwrap();
        assert_eq!(buf.contents(), "thisIsACame\nlCaseWord");
        assert!(buf.insert(p(9, 0), "x").is_err());
    }

    #[test]
    fn error_message_is_one_indexed() {
        let err = EditError::OutOfBounds { pos: p(3, 0) };
        assert_eq!(err.to_string(), "position 4:1 is outside the buffer");
    }
}
