//! Sub-word motions and deletions over every selection at once.
//!
//! | Command | Effect on each selection |
//! |---------|--------------------------|
//! | [`move_right`] / [`move_left`] | collapse onto the boundary from `active` |
//! | [`select_right`] / [`select_left`] | keep `anchor`, move `active` to the boundary |
//! | [`delete_forward`] / [`delete_backward`] | select, then erase what the selections span |
//!
//! Every selection's result depends only on its own prior state. Results come
//! back as a fresh list for the caller to install in one assignment, so no one
//! ever observes a half-updated set of cursors. Selections that end up on the
//! same spot are left as they are; merging duplicates is the editor's call.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::boundary::find_boundary;
use crate::document::Document;
use crate::position::Range;
use crate::scan::Direction;
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Motions
// ---------------------------------------------------------------------------

#[must_use]
pub fn move_right<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> Vec<Selection> {
    move_all(doc, selections, Direction::Forward)
}

#[must_use]
pub fn move_left<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> Vec<Selection> {
    move_all(doc, selections, Direction::Backward)
}

#[must_use]
pub fn select_right<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> Vec<Selection> {
    select_all(doc, selections, Direction::Forward)
}

#[must_use]
pub fn select_left<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> Vec<Selection> {
    select_all(doc, selections, Direction::Backward)
}

fn move_all<D: Document + ?Sized>(
    doc: &D,
    selections: &[Selection],
    direction: Direction,
) -> Vec<Selection> {
    selections
        .iter()
        .map(|sel| Selection::caret(find_boundary(doc, sel.active, direction)))
        .collect()
}

fn select_all<D: Document + ?Sized>(
    doc: &D,
    selections: &[Selection],
    direction: Direction,
) -> Vec<Selection> {
    selections
        .iter()
        .map(|sel| sel.extended_to(find_boundary(doc, sel.active, direction)))
        .collect()
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Result of a delete command: where the carets go and what text goes away.
///
/// `deletions` are in pre-edit coordinates, sorted and non-overlapping, ready
/// to be applied last-to-first as one edit. `selections` are carets in
/// post-edit coordinates, one per input selection, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub selections: Vec<Selection>,
    pub deletions: Vec<Range>,
}

/// Select right, then erase every non-empty selection.
#[must_use]
pub fn delete_forward<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> DeleteOutcome {
    erase_spanned(&select_right(doc, selections))
}

/// Select left, then erase every non-empty selection.
#[must_use]
pub fn delete_backward<D: Document + ?Sized>(doc: &D, selections: &[Selection]) -> DeleteOutcome {
    erase_spanned(&select_left(doc, selections))
}

/// Turn extended selections into one batched deletion.
#[must_use]
pub fn erase_spanned(extended: &[Selection]) -> DeleteOutcome {
    let deletions = merge_ranges(
        extended
            .iter()
            .map(|sel| sel.range())
            .filter(|range| !range.is_empty()),
    );

    let selections = extended
        .iter()
        .map(|sel| {
            let start = sel.range().start;
            let landed = deletions
                .iter()
                .rev()
                .fold(start, |pos, removed| pos.after_deletion(*removed));
            Selection::caret(landed)
        })
        .collect();

    DeleteOutcome {
        selections,
        deletions,
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(ranges: impl Iterator<Item = Range>) -> Vec<Range> {
    let mut sorted: Vec<Range> = ranges.collect();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.touches(range) => *last = last.union(range),
            _ => merged.push(range),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Command names
// ---------------------------------------------------------------------------

/// The six commands, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveRight,
    MoveLeft,
    SelectRight,
    SelectLeft,
    DeleteForward,
    DeleteBackward,
}

impl Command {
    pub const ALL: [Self; 6] = [
        Self::MoveRight,
        Self::MoveLeft,
        Self::SelectRight,
        Self::SelectLeft,
        Self::DeleteForward,
        Self::DeleteBackward,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveRight => "move-right",
            Self::MoveLeft => "move-left",
            Self::SelectRight => "select-right",
            Self::SelectLeft => "select-left",
            Self::DeleteForward => "delete",
            Self::DeleteBackward => "backspace",
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::MoveRight | Self::SelectRight | Self::DeleteForward => Direction::Forward,
            Self::MoveLeft | Self::SelectLeft | Self::DeleteBackward => Direction::Backward,
        }
    }

    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(self, Self::DeleteForward | Self::DeleteBackward)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    const CAMEL: &str = "thisIsACamelCaseWord itsSuperFun   to\twriteIn-CamelCase\n\
                         you could also mix it with12345wordsToSee how it behaves with numbers";

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn caret(line: usize, col: usize) -> Selection {
        Selection::caret(p(line, col))
    }

    fn sel(anchor: (usize, usize), active: (usize, usize)) -> Selection {
        Selection::new(p(anchor.0, anchor.1), p(active.0, active.1))
    }

    // -- Move ---------------------------------------------------------------

    #[test]
    fn move_right_collapses_ranged_selection() {
        assert_eq!(move_right(CAMEL, &[sel((0, 0), (0, 1))]), vec![caret(0, 4)]);
        assert_eq!(move_right(CAMEL, &[sel((0, 0), (0, 4))]), vec![caret(0, 6)]);
    }

    #[test]
    fn move_right_multiple_selections() {
        let moved = move_right(CAMEL, &[caret(0, 0), caret(0, 14), caret(1, 4)]);
        assert_eq!(moved, vec![caret(0, 4), caret(0, 16), caret(1, 9)]);
    }

    #[test]
    fn move_left_multiple_selections() {
        let moved = move_left(CAMEL, &[caret(0, 0), caret(0, 14), caret(1, 4)]);
        assert_eq!(moved, vec![caret(0, 0), caret(0, 12), caret(1, 3)]);
    }

    // -- Select -------------------------------------------------------------

    #[test]
    fn select_right_from_collapsed() {
        assert_eq!(
            select_right(CAMEL, &[caret(0, 0)]),
            vec![sel((0, 0), (0, 4))]
        );
    }

    #[test]
    fn select_right_keeps_anchor() {
        assert_eq!(
            select_right(CAMEL, &[sel((0, 0), (0, 4))]),
            vec![sel((0, 0), (0, 6))]
        );
    }

    #[test]
    fn select_right_to_line_end() {
        assert_eq!(
            select_right(CAMEL, &[caret(1, 62)]),
            vec![sel((1, 62), (1, 69))]
        );
    }

    #[test]
    fn select_left_from_reversed_selection() {
        assert_eq!(
            select_left(CAMEL, &[sel((0, 12), (0, 10))]),
            vec![sel((0, 12), (0, 7))]
        );
        assert_eq!(
            select_left(CAMEL, &[sel((0, 20), (0, 16))]),
            vec![sel((0, 20), (0, 12))]
        );
    }

    #[test]
    fn select_left_multiple_selections() {
        let selected = select_left(CAMEL, &[caret(0, 0), caret(0, 14), caret(1, 4)]);
        assert_eq!(
            selected,
            vec![caret(0, 0), sel((0, 14), (0, 12)), sel((1, 4), (1, 3))]
        );
    }

    #[test]
    fn multi_cursor_matches_single_cursor() {
        let sels = [caret(0, 3), sel((0, 30), (0, 21)), caret(1, 69), caret(1, 0)];
        let all = select_left(CAMEL, &sels);
        for (one, expected) in sels.iter().zip(&all) {
            assert_eq!(select_left(CAMEL, &[*one]), vec![*expected]);
        }
    }

    // -- Delete -------------------------------------------------------------

    #[test]
    fn delete_forward_removes_next_part() {
        let out = delete_forward(CAMEL, &[caret(0, 12)]);
        assert_eq!(out.deletions, vec![Range::new(p(0, 12), p(0, 16))]);
        assert_eq!(out.selections, vec![caret(0, 12)]);
    }

    #[test]
    fn delete_backward_removes_previous_part() {
        let out = delete_backward(CAMEL, &[caret(0, 11)]);
        assert_eq!(out.deletions, vec![Range::new(p(0, 7), p(0, 11))]);
        assert_eq!(out.selections, vec![caret(0, 7)]);
    }

    #[test]
    fn delete_at_document_edge_deletes_nothing() {
        let out = delete_backward(CAMEL, &[caret(0, 0)]);
        assert!(out.deletions.is_empty());
        assert_eq!(out.selections, vec![caret(0, 0)]);
    }

    #[test]
    fn delete_with_several_cursors_shifts_later_carets() {
        // "this" and "Camel" go; the second caret slides left by 4.
        let out = delete_forward(CAMEL, &[caret(0, 0), caret(0, 7), caret(1, 4)]);
        assert_eq!(
            out.deletions,
            vec![
                Range::new(p(0, 0), p(0, 4)),
                Range::new(p(0, 7), p(0, 12)),
                Range::new(p(1, 4), p(1, 9)),
            ]
        );
        assert_eq!(out.selections, vec![caret(0, 0), caret(0, 3), caret(1, 4)]);
    }

    #[test]
    fn delete_across_lines_moves_carets_on_joined_line() {
        // Deleting from the end of line 0 to the first word of line 2 joins them.
        let doc = "ab\n\n  cd ef";
        let out = delete_forward(doc, &[caret(0, 2), caret(2, 4)]);
        assert_eq!(
            out.deletions,
            vec![Range::new(p(0, 2), p(2, 2)), Range::new(p(2, 4), p(2, 5))]
        );
        assert_eq!(out.selections, vec![caret(0, 2), caret(0, 4)]);
    }

    #[test]
    fn overlapping_deletions_merge() {
        let extended = [sel((0, 0), (0, 5)), sel((0, 3), (0, 8)), sel((0, 10), (0, 8))];
        let out = erase_spanned(&extended);
        assert_eq!(out.deletions, vec![Range::new(p(0, 0), p(0, 10))]);
        assert_eq!(out.selections, vec![caret(0, 0); 3]);
    }

    // -- Names --------------------------------------------------------------

    #[test]
    fn names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.name().parse::<Command>(), Ok(cmd));
        }
        assert_eq!(
            "jump".parse::<Command>(),
            Err(UnknownCommand("jump".to_string()))
        );
    }

    #[test]
    fn directions() {
        assert_eq!(Command::MoveRight.direction(), Direction::Forward);
        assert_eq!(Command::DeleteBackward.direction(), Direction::Backward);
        assert!(Command::DeleteForward.is_delete());
        assert!(!Command::SelectLeft.is_delete());
    }

    // -- Properties ---------------------------------------------------------

    mod props {
        use proptest::prelude::*;

        use super::super::*;
        use crate::position::Position;

        type Motion = fn(&[String], &[Selection]) -> Vec<Selection>;

        const MOTIONS: [Motion; 4] = [
            move_right::<[String]>,
            move_left::<[String]>,
            select_right::<[String]>,
            select_left::<[String]>,
        ];

        fn arb_doc_and_selections() -> impl Strategy<Value = (Vec<String>, Vec<Selection>)> {
            prop::collection::vec("[aZ9_ .śŚ]{0,10}", 1..5).prop_flat_map(|lines| {
                let count = lines.len();
                let end = (0..count, 0..12usize).prop_map(|(l, c)| Position::new(l, c));
                let sel = (end.clone(), end).prop_map(|(a, b)| Selection::new(a, b));
                (Just(lines), prop::collection::vec(sel, 1..5))
            })
        }

        proptest! {
            #[test]
            fn multi_cursor_equals_per_cursor((lines, sels) in arb_doc_and_selections()) {
                let doc: &[String] = &lines;
                for motion in MOTIONS {
                    let all = motion(doc, &sels);
                    prop_assert_eq!(all.len(), sels.len());
                    for (one, expected) in sels.iter().zip(&all) {
                        prop_assert_eq!(motion(doc, &[*one]), vec![*expected]);
                    }
                }
            }

            #[test]
            fn delete_outcome_is_sorted_and_disjoint((lines, sels) in arb_doc_and_selections()) {
                let doc: &[String] = &lines;
                let out = delete_forward(doc, &sels);
                prop_assert_eq!(out.selections.len(), sels.len());
                for pair in out.deletions.windows(2) {
                    prop_assert!(pair[0].end < pair[1].start, "{:?}", out.deletions);
                }
                prop_assert!(out.deletions.iter().all(|r| !r.is_empty()));
            }
        }
    }
}
