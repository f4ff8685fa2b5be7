//! The editor: a buffer, its selections and their shared undo history.
//!
//! [`Editor::execute`] is where the pure command functions meet mutable
//! state. Motions swap the whole selection list in one assignment. Deletions
//! go through the buffer as one history transaction, so undo restores every
//! removed range and every pre-delete selection together.

use tracing::debug;

use crate::buffer::{Buffer, EditError};
use crate::command::{self, Command};
use crate::history::History;
use crate::markup::{self, MarkupError};
use crate::position::{Position, Range};
use crate::selection::Selection;

#[derive(Debug)]
pub struct Editor {
    buffer: Buffer,
    selections: Vec<Selection>,
    history: History,
}

impl Editor {
    /// An editor over `buffer`. With no selections given, a single caret is
    /// placed at the start of the buffer.
    #[must_use]
    pub fn new(buffer: Buffer, selections: Vec<Selection>) -> Self {
        let selections = if selections.is_empty() {
            vec![Selection::caret(Position::ZERO)]
        } else {
            selections
        };
        Self {
            buffer,
            selections,
            history: History::new(),
        }
    }

    /// Build an editor from [selection markup](crate::markup).
    ///
    /// # Errors
    ///
    /// Any [`MarkupError`] from parsing `marked`.
    pub fn from_markup(marked: &str) -> Result<Self, MarkupError> {
        let (text, selections) = markup::parse(marked)?;
        Ok(Self::new(Buffer::from_text(&text), selections))
    }

    /// The buffer and selections as selection markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        markup::render_buffer(&self.buffer, &self.selections)
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Replace the selections. An empty list leaves the current ones alone.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        if !selections.is_empty() {
            self.selections = selections;
        }
    }

    // -- Commands -----------------------------------------------------------

    /// Run one command against every selection.
    ///
    /// # Errors
    ///
    /// [`EditError`] if a deletion falls outside the buffer. Ranges come from
    /// the buffer itself, so this only happens if the selections were set to
    /// positions the buffer does not have.
    pub fn execute(&mut self, cmd: Command) -> Result<(), EditError> {
        let doc = &self.buffer;
        let (selections, deleted) = match cmd {
            Command::MoveRight => (command::move_right(doc, &self.selections), 0),
            Command::MoveLeft => (command::move_left(doc, &self.selections), 0),
            Command::SelectRight => (command::select_right(doc, &self.selections), 0),
            Command::SelectLeft => (command::select_left(doc, &self.selections), 0),
            Command::DeleteForward => {
                let extended = command::select_right(doc, &self.selections);
                self.erase(&extended)?
            }
            Command::DeleteBackward => {
                let extended = command::select_left(doc, &self.selections);
                self.erase(&extended)?
            }
        };

        debug!(
            command = %cmd,
            selections = selections.len(),
            deleted,
            "executed"
        );
        self.selections = selections;
        Ok(())
    }

    /// Delete what `extended` spans as one transaction. Returns the
    /// collapsed carets and the number of ranges removed.
    ///
    /// Every range is checked before the first one is deleted, so a failure
    /// leaves the buffer, the selections and the history as they were.
    fn erase(&mut self, extended: &[Selection]) -> Result<(Vec<Selection>, usize), EditError> {
        let outcome = command::erase_spanned(extended);
        for range in &outcome.deletions {
            self.buffer.check_range(*range)?;
        }

        self.history.begin(extended);
        let applied = self.apply_deletions(&outcome.deletions);
        self.history.commit(&outcome.selections);
        applied?;

        Ok((outcome.selections, outcome.deletions.len()))
    }

    /// Delete last to first so earlier ranges keep their coordinates.
    fn apply_deletions(&mut self, deletions: &[Range]) -> Result<(), EditError> {
        for range in deletions.iter().rev() {
            let removed = self.buffer.delete(*range)?;
            self.history.record_delete(range.start, &removed);
        }
        Ok(())
    }

    // -- Undo / redo --------------------------------------------------------

    /// Undo the last delete. Returns `false` if there was nothing to undo.
    ///
    /// # Errors
    ///
    /// [`EditError`] if the history no longer fits the buffer.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        match self.history.undo(&mut self.buffer)? {
            Some(selections) => {
                self.selections = selections;
                Ok(true)
            }
            None => {
                debug!("nothing to undo");
                Ok(false)
            }
        }
    }

    /// Redo the last undone delete. Returns `false` if there was nothing to
    /// redo.
    ///
    /// # Errors
    ///
    /// [`EditError`] if the history no longer fits the buffer.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        match self.history.redo(&mut self.buffer)? {
            Some(selections) => {
                self.selections = selections;
                Ok(true)
            }
            None => {
                debug!("nothing to redo");
                Ok(false)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
