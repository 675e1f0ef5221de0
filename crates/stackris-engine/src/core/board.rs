use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::piece::{Piece, RotationState, ShapeKind};

/// Number of columns in the playfield.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows in the playfield.
pub const BOARD_HEIGHT: usize = 20;

#[expect(clippy::cast_possible_wrap)]
const BOARD_WIDTH_I16: i16 = BOARD_WIDTH as i16;
#[expect(clippy::cast_possible_wrap)]
const BOARD_HEIGHT_I16: i16 = BOARD_HEIGHT as i16;

/// A single cell of the playfield.
///
/// Occupied cells remember the kind of the piece that filled them. The kind is
/// an opaque identity tag used only for rendering; collision detection and the
/// heuristics care about occupancy alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of the given kind.
    Piece(ShapeKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The playfield: a fixed 10×20 grid of cells.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell
/// - X increases rightward (columns), Y increases downward (rows)
/// - Collision queries accept signed coordinates; rows above the visible top
///   (y < 0) never collide against occupancy, only against the side walls and
///   the floor, so pieces can be evaluated while partially above the grid
///
/// Dimensions are fixed at construction; every row always holds exactly
/// [`BOARD_WIDTH`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    /// Returns the cell at the given playfield coordinates.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Checks whether a rotation state placed at the given offset collides.
    ///
    /// A cell collides when its column leaves `[0, WIDTH)`, its row reaches
    /// the floor (`y >= HEIGHT`), or it lands on an occupied cell. Cells with
    /// `y < 0` are above the visible grid and only collide against bounds.
    #[must_use]
    pub fn is_colliding_cells(&self, cells: &RotationState, x0: i16, y0: i16) -> bool {
        for &(dx, dy) in cells {
            let x = x0 + i16::from(dx);
            let y = y0 + i16::from(dy);
            if x < 0 || x >= BOARD_WIDTH_I16 || y >= BOARD_HEIGHT_I16 {
                return true;
            }
            if y >= 0
                && !self.rows[usize::from(y.unsigned_abs())][usize::from(x.unsigned_abs())]
                    .is_empty()
            {
                return true;
            }
        }
        false
    }

    /// Checks whether the piece collides at its current position.
    #[must_use]
    pub fn is_colliding(&self, piece: Piece) -> bool {
        self.is_colliding_cells(piece.cells(), piece.x(), piece.y())
    }

    /// Marks each in-bounds cell of the rotation state as occupied.
    ///
    /// No collision re-check is performed; callers must have validated the
    /// position with [`is_colliding_cells`](Self::is_colliding_cells) first.
    pub fn fill_cells(&mut self, cells: &RotationState, x0: i16, y0: i16, kind: ShapeKind) {
        for &(dx, dy) in cells {
            let x = x0 + i16::from(dx);
            let y = y0 + i16::from(dy);
            if (0..BOARD_WIDTH_I16).contains(&x) && (0..BOARD_HEIGHT_I16).contains(&y) {
                self.rows[usize::from(y.unsigned_abs())][usize::from(x.unsigned_abs())] =
                    Cell::Piece(kind);
            }
        }
    }

    /// Locks a piece onto the board at its current position.
    pub fn fill_piece(&mut self, piece: Piece) {
        self.fill_cells(piece.cells(), piece.x(), piece.y(), piece.kind());
    }

    /// Clears every fully-occupied row and returns how many were cleared.
    ///
    /// Remaining rows keep their relative order and the cleared count of empty
    /// rows is inserted at the top, so the board always keeps exactly
    /// [`BOARD_HEIGHT`] rows. Reapplying to the result clears nothing.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].iter().all(|cell| !cell.is_empty()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill([Cell::Empty; BOARD_WIDTH]);
        count
    }

    /// Builds a board from ASCII art for tests and fixtures.
    ///
    /// `#` is an occupied cell, `.` an empty one; other characters are
    /// ignored. Rows are listed top to bottom and may cover fewer than 20
    /// rows, in which case they fill the bottom of the board.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= BOARD_HEIGHT, "too many rows in board art");

        let y_offset = BOARD_HEIGHT - lines.len();
        for (y, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "each row must have exactly {BOARD_WIDTH} cells, got {} at row {y}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[y_offset + y][x] = Cell::Piece(ShapeKind::I);
                }
            }
        }
        board
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: one char per cell ('.' or the piece kind letter), rows
        // joined by '|' (e.g. "..........|....T.....|...")
        let mut s = String::with_capacity(BOARD_HEIGHT * (BOARD_WIDTH + 1));
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                s.push('|');
            }
            for cell in row {
                match cell {
                    Cell::Empty => s.push('.'),
                    Cell::Piece(kind) => write!(&mut s, "{}", kind.as_char()).unwrap(),
                }
            }
        }
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let rows: Vec<&str> = s.split('|').collect();
        if rows.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} '|'-separated rows, got {}",
                rows.len()
            )));
        }

        let mut board = Board::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y} must have {BOARD_WIDTH} cells, got {}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = ShapeKind::from_char(ch).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell char at ({x}, {y}): {ch}"))
                })?;
                board.rows[y][x] = Cell::Piece(kind);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_occupied_cells() {
        let board = Board::EMPTY;
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                assert!(board.cell(x, y).is_empty(), "cell ({x}, {y}) not empty");
            }
        }
    }

    #[test]
    fn collision_against_walls_and_floor() {
        let board = Board::EMPTY;
        let cells: RotationState = [(0, 0), (1, 0), (0, 1), (1, 1)];

        assert!(!board.is_colliding_cells(&cells, 0, 0));
        assert!(board.is_colliding_cells(&cells, -1, 0), "left wall");
        assert!(board.is_colliding_cells(&cells, 9, 0), "right wall");
        assert!(!board.is_colliding_cells(&cells, 8, 18));
        assert!(board.is_colliding_cells(&cells, 8, 19), "floor");
    }

    #[test]
    fn rows_above_top_collide_only_against_bounds() {
        let board = Board::from_ascii(
            r"
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ##########
            ",
        );
        let cells: RotationState = [(0, 0), (1, 0), (0, 1), (1, 1)];

        // Fully above the grid: no occupancy check applies.
        assert!(!board.is_colliding_cells(&cells, 4, -2));
        // Straddling the top edge: the in-grid cells collide.
        assert!(board.is_colliding_cells(&cells, 4, -1));
        // Out of bounds above the grid still collides against the walls.
        assert!(board.is_colliding_cells(&cells, -1, -5));
    }

    #[test]
    fn fill_cells_marks_only_in_bounds_cells() {
        let mut board = Board::EMPTY;
        let cells: RotationState = [(0, 0), (1, 0), (0, 1), (1, 1)];
        board.fill_cells(&cells, 0, -1, ShapeKind::O);

        assert_eq!(board.cell(0, 0), Cell::Piece(ShapeKind::O));
        assert_eq!(board.cell(1, 0), Cell::Piece(ShapeKind::O));
        let occupied = board
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn clear_full_rows_single() {
        let mut board = Board::from_ascii(
            r"
            .....#....
            ##########
            ",
        );
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(5, BOARD_HEIGHT - 1), Cell::Piece(ShapeKind::I));
        let occupied = board
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 1);
    }

    #[test]
    fn clear_full_rows_keeps_relative_order() {
        let mut board = Board::from_ascii(
            r"
            #.........
            ##########
            .#........
            ##########
            ..#.......
            ",
        );
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.cell(0, 17), Cell::Piece(ShapeKind::I));
        assert_eq!(board.cell(1, 18), Cell::Piece(ShapeKind::I));
        assert_eq!(board.cell(2, 19), Cell::Piece(ShapeKind::I));
        let occupied = board
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn clear_full_rows_is_idempotent_on_its_output() {
        let mut board = Board::from_ascii(
            r"
            ..##......
            ##########
            ##########
            ",
        );
        assert_eq!(board.clear_full_rows(), 2);
        let after = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, after);
    }

    #[test]
    fn clear_full_rows_preserves_row_count() {
        let mut board = Board::from_ascii(
            r"
            ##########
            ##########
            ##########
            ##########
            ",
        );
        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn board_serialization_round_trip() {
        let mut board = Board::EMPTY;
        board.rows[0][0] = Cell::Piece(ShapeKind::T);
        board.rows[19][9] = Cell::Piece(ShapeKind::L);

        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.starts_with("\"T........."));
        assert!(serialized.ends_with(".........L\""));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn board_deserialization_rejects_bad_input() {
        assert!(serde_json::from_str::<Board>("\"..\"").is_err());
        let row_with_bad_char = format!("\"{}\"", ["x........."; 20].join("|"));
        assert!(serde_json::from_str::<Board>(&row_with_bad_char).is_err());
    }
}
