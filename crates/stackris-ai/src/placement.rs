use stackris_engine::core::{Board, RotationState, ShapeKind};

use crate::board_metrics::{aggregate_height, bumpiness, holes};

#[expect(clippy::cast_possible_wrap)]
const BOARD_WIDTH_I16: i16 = Board::WIDTH as i16;

/// Reward per cleared line.
const LINE_CLEAR_WEIGHT: i32 = 1000;
/// Penalty per hole in the resulting stack.
const HOLE_WEIGHT: i32 = 500;
/// Penalty per unit of aggregate column height.
const HEIGHT_WEIGHT: i32 = 10;
/// Penalty per unit of surface bumpiness.
const BUMPINESS_WEIGHT: i32 = 10;
/// Flat bonus for clearing four lines at once.
const QUAD_CLEAR_BONUS: i32 = 5000;

/// A fully evaluated drop target for one shape.
///
/// `column` and `row` are the anchor position of the piece at rest, `rotation`
/// the rotation-state index it rests in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rotation: usize,
    pub column: i16,
    pub row: i16,
    pub score: i32,
}

/// Scores a post-lock, post-clear board state.
///
/// Line clears and the quad bonus reward the placement itself; the remaining
/// terms judge the stack it leaves behind. All metrics are taken after full
/// rows have been removed.
#[must_use]
pub fn score_board(board: &Board, cleared_lines: usize) -> i32 {
    let mut score = LINE_CLEAR_WEIGHT * to_i32(cleared_lines)
        - HOLE_WEIGHT * to_i32(holes(board))
        - HEIGHT_WEIGHT * to_i32(aggregate_height(board))
        - BUMPINESS_WEIGHT * to_i32(bumpiness(board));
    if cleared_lines == 4 {
        score += QUAD_CLEAR_BONUS;
    }
    score
}

/// Exhaustively evaluates every rotation and column for `kind` on `board`
/// and returns the highest-scoring placement.
///
/// Candidates are visited rotation-major, column-ascending, and ties keep the
/// first candidate found. Each candidate is simulated on a scratch copy of
/// the board: the piece drops straight down from the top, locks, full rows
/// clear, and the result is scored. Returns `None` when no column admits the
/// piece at all.
#[must_use]
pub fn best_placement(board: &Board, kind: ShapeKind) -> Option<Placement> {
    let mut best: Option<Placement> = None;

    for (rotation, cells) in kind.rotation_states().iter().enumerate() {
        let min_dx = cells.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let max_dx = cells.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
        let min_x = -i16::from(min_dx);
        let max_x = BOARD_WIDTH_I16 - 1 - i16::from(max_dx);

        for column in min_x..=max_x {
            let Some(row) = drop_row(board, cells, column) else {
                continue;
            };

            let mut scratch = board.clone();
            scratch.fill_cells(cells, column, row, kind);
            let cleared_lines = scratch.clear_full_rows();
            let score = score_board(&scratch, cleared_lines);

            if best.is_none_or(|b| score > b.score) {
                best = Some(Placement {
                    rotation,
                    column,
                    row,
                    score,
                });
            }
        }
    }
    best
}

/// Lowest anchor row where the cells rest when dropped from the top, or
/// `None` when even the topmost row collides.
fn drop_row(board: &Board, cells: &RotationState, column: i16) -> Option<i16> {
    let mut row = 0;
    while !board.is_colliding_cells(cells, column, row) {
        row += 1;
    }
    row -= 1;
    (row >= 0).then_some(row)
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_bar_hugs_the_wall_on_an_empty_board() {
        let best = best_placement(&Board::EMPTY, ShapeKind::I).unwrap();

        // Horizontal against a wall leaves one height step; anywhere in the
        // middle leaves two, and vertical stacks four rows high.
        assert_eq!(best.rotation, 0);
        assert_eq!(best.column, 0);
        assert_eq!(best.row, 18);
        assert_eq!(best.score, -(HEIGHT_WEIGHT * 4) - BUMPINESS_WEIGHT);
    }

    #[test]
    fn bar_completes_the_bottom_row() {
        let board = Board::from_ascii(
            r"
            ....######
            ",
        );
        let best = best_placement(&board, ShapeKind::I).unwrap();
        assert_eq!(best.rotation, 0);
        assert_eq!(best.column, 0);
        assert_eq!(best.row, 18);
        // The clear empties the board, so only the line reward remains.
        assert_eq!(best.score, LINE_CLEAR_WEIGHT);
    }

    #[test]
    fn vertical_bar_rests_on_the_bottom_row() {
        let cells = &ShapeKind::I.rotation_states()[1];
        let row = drop_row(&Board::EMPTY, cells, 0).unwrap();
        // Lowest cell offset is (2, 3), so the anchor rests three above the
        // floor.
        assert_eq!(row, 16);
        assert!(Board::EMPTY.is_colliding_cells(cells, 0, row + 1));
    }

    #[test]
    fn single_gap_in_the_bottom_row_gets_plugged() {
        let board = Board::from_ascii(
            r"
            .#########
            ",
        );
        let best = best_placement(&board, ShapeKind::I).unwrap();
        // Only the upright bar fits the gap; its three leftover cells stay
        // stacked in the corner after the clear.
        assert_eq!(best.rotation, 1);
        assert_eq!(best.column, -2);
        assert_eq!(best.row, 16);
        assert_eq!(
            best.score,
            LINE_CLEAR_WEIGHT - HEIGHT_WEIGHT * 3 - BUMPINESS_WEIGHT * 3
        );
    }

    #[test]
    fn quad_clear_earns_the_flat_bonus() {
        let board = Board::from_ascii(
            r"
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let best = best_placement(&board, ShapeKind::I).unwrap();
        assert_eq!(best.rotation, 1);
        assert_eq!(best.column, 7);
        assert_eq!(best.row, 16);
        assert_eq!(best.score, LINE_CLEAR_WEIGHT * 4 + QUAD_CLEAR_BONUS);
    }

    #[test]
    fn equal_scores_keep_the_first_candidate() {
        // A square scores the same against either wall; the left wall is
        // visited first and must win.
        let best = best_placement(&Board::EMPTY, ShapeKind::O).unwrap();
        assert_eq!(best.column, 0);

        let cells = &ShapeKind::O.rotation_states()[0];
        let mut left = Board::EMPTY;
        left.fill_cells(cells, 0, 18, ShapeKind::O);
        let mut right = Board::EMPTY;
        right.fill_cells(cells, 8, 18, ShapeKind::O);
        assert_eq!(score_board(&left, 0), score_board(&right, 0));
        assert_eq!(best.score, score_board(&left, 0));
    }

    #[test]
    fn chosen_placements_avoid_holes_where_possible() {
        // On a flat floor every shape except the skew pair can rest without
        // roofing an empty cell, and the hole penalty dominates the other
        // terms, so the winner must be hole-free.
        for kind in ShapeKind::ALL {
            let best = best_placement(&Board::EMPTY, kind).unwrap();
            let cells = &kind.rotation_states()[best.rotation];
            let mut scratch = Board::EMPTY;
            scratch.fill_cells(cells, best.column, best.row, kind);

            let expected = match kind {
                ShapeKind::S | ShapeKind::Z => 1,
                _ => 0,
            };
            assert_eq!(holes(&scratch), expected, "{kind:?}");
        }
    }

    #[test]
    fn full_board_admits_no_placement() {
        let art = ["##########"; 20].join("\n");
        let board = Board::from_ascii(&art);
        assert_eq!(best_placement(&board, ShapeKind::T), None);
    }
}
