use stackris_engine::core::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Height of one column: distance from the floor to its topmost occupied
/// cell, 0 for an empty column.
#[must_use]
pub fn column_height(board: &Board, x: usize) -> usize {
    for y in 0..BOARD_HEIGHT {
        if !board.cell(x, y).is_empty() {
            return BOARD_HEIGHT - y;
        }
    }
    0
}

/// Sum of all column heights.
#[must_use]
pub fn aggregate_height(board: &Board) -> usize {
    (0..BOARD_WIDTH).map(|x| column_height(board, x)).sum()
}

/// Number of empty cells with at least one occupied cell above them in the
/// same column. Holes are what the heuristic punishes hardest, since they
/// block whole rows from clearing.
#[must_use]
pub fn holes(board: &Board) -> usize {
    let mut count = 0;
    for x in 0..BOARD_WIDTH {
        let mut roofed = false;
        for y in 0..BOARD_HEIGHT {
            if !board.cell(x, y).is_empty() {
                roofed = true;
            } else if roofed {
                count += 1;
            }
        }
    }
    count
}

/// Sum of absolute height differences between adjacent columns.
#[must_use]
pub fn bumpiness(board: &Board) -> usize {
    (0..BOARD_WIDTH - 1)
        .map(|x| column_height(board, x).abs_diff(column_height(board, x + 1)))
        .sum()
}
