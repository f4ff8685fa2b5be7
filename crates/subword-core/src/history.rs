//! Undo/redo history, one transaction per delete command.
//!
//! A delete across N cursors removes up to N ranges from the buffer. They are
//! recorded into one [`Transaction`] so a single undo puts every range back
//! and restores every selection together:
//!
//! ```text
//! history.begin(extended_selections);
//! // for each range, last to first:
//! let removed = buffer.delete(range)?;
//! history.record_delete(range.start, &removed);
//! history.commit(collapsed_selections);
//! ```
//!
//! Transactions with no recorded deletion are dropped on commit, so a delete
//! that found nothing to erase leaves no empty undo step behind.

use crate::buffer::{Buffer, EditError};
use crate::position::{Position, Range};
use crate::selection::Selection;

/// Text removed at `pos`. Undo re-inserts it; redo removes it again.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Deletion {
    pos: Position,
    text: String,
}

impl Deletion {
    fn range(&self) -> Range {
        Range::new(self.pos, end_after_insert(self.pos, &self.text))
    }
}

/// Deletions that undo and redo as one unit, with the selections on either
/// side of them.
#[derive(Debug, Clone)]
struct Transaction {
    deletions: Vec<Deletion>,
    selections_before: Vec<Selection>,
    selections_after: Vec<Selection>,
}

impl Transaction {
    /// Re-insert in reverse recording order. Deletions are recorded last
    /// range first, so this restores the earliest range first and every
    /// recorded position is valid again by the time it is used.
    fn undo(&self, buf: &mut Buffer) -> Result<(), EditError> {
        for deletion in self.deletions.iter().rev() {
            buf.insert(deletion.pos, &deletion.text)?;
        }
        Ok(())
    }

    fn redo(&self, buf: &mut Buffer) -> Result<(), EditError> {
        for deletion in &self.deletions {
            buf.delete(deletion.range())?;
        }
        Ok(())
    }
}

/// Undo/redo stacks for one buffer. A new transaction clears the redo stack.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<Transaction>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
        }
    }

    /// Start a transaction. `selections` are what undo will restore.
    ///
    /// A still-pending transaction is committed first.
    pub fn begin(&mut self, selections: &[Selection]) {
        if self.pending.is_some() {
            self.commit(selections);
        }
        self.pending = Some(Transaction {
            deletions: Vec::new(),
            selections_before: selections.to_vec(),
            selections_after: selections.to_vec(),
        });
    }

    /// Record that `text` was removed at `pos`. Does nothing outside a
    /// transaction.
    pub fn record_delete(&mut self, pos: Position, text: &str) {
        if let Some(txn) = &mut self.pending {
            txn.deletions.push(Deletion {
                pos,
                text: text.to_string(),
            });
        }
    }

    /// Finish the pending transaction. `selections` are what redo will
    /// restore.
    pub fn commit(&mut self, selections: &[Selection]) {
        if let Some(mut txn) = self.pending.take() {
            if txn.deletions.is_empty() {
                return;
            }
            txn.selections_after = selections.to_vec();
            self.redo_stack.clear();
            self.undo_stack.push(txn);
        }
    }

    /// Undo the last transaction and return the selections to restore, or
    /// `None` if there is nothing to undo.
    ///
    /// # Errors
    ///
    /// [`EditError`] if the buffer was changed behind the history's back and
    /// a recorded position no longer exists.
    pub fn undo(&mut self, buf: &mut Buffer) -> Result<Option<Vec<Selection>>, EditError> {
        if let Some(txn) = self.pending.take() {
            if !txn.deletions.is_empty() {
                self.redo_stack.clear();
                self.undo_stack.push(txn);
            }
        }

        let Some(txn) = self.undo_stack.pop() else {
            return Ok(None);
        };
        txn.undo(buf)?;
        let selections = txn.selections_before.clone();
        self.redo_stack.push(txn);
        Ok(Some(selections))
    }

    /// Redo the last undone transaction and return the selections to
    /// restore, or `None` if there is nothing to redo.
    ///
    /// # Errors
    ///
    /// See [`undo`](Self::undo).
    pub fn redo(&mut self, buf: &mut Buffer) -> Result<Option<Vec<Selection>>, EditError> {
        let Some(txn) = self.redo_stack.pop() else {
            return Ok(None);
        };
        txn.redo(buf)?;
        let selections = txn.selections_after.clone();
        self.undo_stack.push(txn);
        Ok(Some(selections))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
            || self
                .pending
                .as_ref()
                .is_some_and(|t| !t.deletions.is_empty())
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The position just past `text` if it were inserted at `start`. Handles
/// `\n`, `\r\n` and `\r`.
fn end_after_insert(start: Position, text: &str) -> Position {
    let mut line = start.line;
    let mut col = start.col;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                line += 1;
                col = 0;
            }
            '\r' => {
                line += 1;
                col = 0;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => col += 1,
        }
    }

    Position::new(line, col)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
