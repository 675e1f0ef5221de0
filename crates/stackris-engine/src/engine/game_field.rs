use crate::{
    PieceCollisionError, SpawnCollisionError,
    core::{
        board::Board,
        piece::{Piece, ShapeKind},
    },
};

use super::piece_bag::PieceBag;

/// Single-turn game state: the board, the falling piece, and the shape queue.
///
/// The next shape is drawn ahead of time so it can be previewed; the search
/// deliberately ignores it.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    next_kind: ShapeKind,
    bag: PieceBag,
}

impl GameField {
    #[must_use]
    pub fn new(mut bag: PieceBag) -> Self {
        let falling_piece = Piece::new(bag.next_kind());
        let next_kind = bag.next_kind();
        Self {
            board: Board::EMPTY,
            falling_piece,
            next_kind,
            bag,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    /// The shape that spawns after the current piece locks.
    #[must_use]
    pub fn next_kind(&self) -> ShapeKind {
        self.next_kind
    }

    /// Replaces the falling piece after validating it against the board.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Moves the falling piece down one row if nothing blocks it.
    ///
    /// Returns `false` when the piece is resting and ready to lock.
    pub fn apply_gravity_step(&mut self) -> bool {
        let dropped = self.falling_piece.down();
        if self.board.is_colliding(dropped) {
            return false;
        }
        self.falling_piece = dropped;
        true
    }

    /// Locks the falling piece, clears full rows, and spawns the next piece.
    ///
    /// Returns the number of cleared lines; the `Err` variant signals a spawn
    /// collision, i.e. game over.
    pub fn lock_and_spawn(&mut self) -> (usize, Result<(), SpawnCollisionError>) {
        self.board.fill_piece(self.falling_piece);
        let cleared_lines = self.board.clear_full_rows();

        self.falling_piece = Piece::new(self.next_kind);
        self.next_kind = self.bag.next_kind();
        if self.board.is_colliding(self.falling_piece) {
            return (cleared_lines, Err(SpawnCollisionError));
        }
        (cleared_lines, Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> GameField {
        GameField::new(PieceBag::with_seed(1))
    }

    #[test]
    fn gravity_descends_until_resting_then_lock_fills_the_board() {
        let mut field = field();
        while field.apply_gravity_step() {}

        // Resting on the floor; every cell of the piece must be in bounds.
        let resting = field.falling_piece();
        assert!(
            resting
                .occupied_positions()
                .all(|(x, y)| (0..10).contains(&x) && (0..20).contains(&y))
        );

        let (cleared, result) = field.lock_and_spawn();
        assert_eq!(cleared, 0);
        assert!(result.is_ok());

        let occupied = field
            .board()
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 4);
        assert_eq!(field.falling_piece().x(), Piece::SPAWN_X);
    }

    #[test]
    fn set_falling_piece_rejects_colliding_positions() {
        let mut field = field();
        let before = field.falling_piece();

        let mut shoved = before;
        for _ in 0..10 {
            shoved = shoved.left();
        }
        assert!(field.set_falling_piece(shoved).is_err());
        assert_eq!(field.falling_piece(), before);
    }

    #[test]
    fn stacking_without_moving_eventually_tops_out() {
        let mut field = field();
        let mut topped_out = false;
        for _ in 0..100 {
            while field.apply_gravity_step() {}
            let (_, result) = field.lock_and_spawn();
            if result.is_err() {
                topped_out = true;
                break;
            }
        }
        assert!(topped_out, "spawn-column stacking must reach the top");
    }
}
