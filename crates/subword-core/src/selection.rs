//! Selections, each an anchor and an active end.
//!
//! The *active* end is where the caret sits and what movement repositions.
//! The *anchor* is the fixed end of a range selection. A caret is a selection
//! whose two ends coincide.
//!
//! The editor owns the list of selections; this crate only computes new
//! `(anchor, active)` pairs from old ones.

use std::fmt;

use crate::position::{Position, Range};

/// One selection: `anchor` stays, `active` moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    #[inline]
    #[must_use]
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// A collapsed selection (plain caret) at `pos`.
    #[inline]
    #[must_use]
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.anchor.line == self.active.line && self.anchor.col == self.active.col
    }

    /// True when the active end comes before the anchor.
    #[inline]
    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.active < self.anchor
    }

    /// The covered text as an ordered range.
    #[inline]
    #[must_use]
    pub fn range(self) -> Range {
        Range::ordered(self.anchor, self.active)
    }

    /// Keep the anchor, put the active end at `pos`.
    #[inline]
    #[must_use]
    pub const fn extended_to(self, pos: Position) -> Self {
        Self {
            anchor: self.anchor,
            active: pos,
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Caret({}:{})", self.active.line, self.active.col)
        } else {
            write!(
                f,
                "Sel({}:{} -> {}:{})",
                self.anchor.line, self.anchor.col, self.active.line, self.active.col
            )
        }
    }
}
