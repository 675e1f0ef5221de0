use arrayvec::ArrayVec;
use stackris_engine::{core::Piece, engine::Action};

use crate::placement::Placement;

/// Longest possible plan: three rotation steps plus nine column shifts.
pub const MAX_PLAN_LEN: usize = 12;

/// Translates a placement into the action sequence that reaches it, rotation
/// steps first, then horizontal shifts.
///
/// Rotations always step forward through the catalog, wrapping as the piece
/// does, so the step count is the forward distance between the two rotation
/// indices. Gravity is not part of the plan; the session supplies it.
#[must_use]
pub fn plan_moves(piece: Piece, placement: &Placement) -> ArrayVec<Action, MAX_PLAN_LEN> {
    let mut plan = ArrayVec::new();

    let num_rotations = usize::from(piece.kind().num_rotations());
    let rotation_steps = (placement.rotation + num_rotations - piece.rotation()) % num_rotations;
    plan.extend(std::iter::repeat_n(Action::Rotate, rotation_steps));

    let shift = placement.column - piece.x();
    let step = if shift < 0 { Action::Left } else { Action::Right };
    plan.extend(std::iter::repeat_n(step, usize::from(shift.unsigned_abs())));

    plan
}

#[cfg(test)]
mod tests {
    use stackris_engine::core::ShapeKind;

    use super::*;

    fn placement(rotation: usize, column: i16) -> Placement {
        Placement {
            rotation,
            column,
            row: 0,
            score: 0,
        }
    }

    #[test]
    fn rotations_come_before_shifts() {
        let piece = Piece::new(ShapeKind::T);
        let plan = plan_moves(piece, &placement(3, 6));
        assert_eq!(
            plan.as_slice(),
            [
                Action::Rotate,
                Action::Rotate,
                Action::Rotate,
                Action::Right,
                Action::Right,
                Action::Right,
            ]
        );
    }

    #[test]
    fn leftward_targets_shift_left() {
        let piece = Piece::new(ShapeKind::J);
        let plan = plan_moves(piece, &placement(1, 0));
        assert_eq!(
            plan.as_slice(),
            [Action::Rotate, Action::Left, Action::Left, Action::Left]
        );
    }

    #[test]
    fn rotation_distance_wraps_forward() {
        let piece = Piece::new(ShapeKind::S).rotated();
        assert_eq!(piece.rotation(), 1);
        // Back to state 0 takes one forward step on a two-state shape.
        let plan = plan_moves(piece, &placement(0, piece.x()));
        assert_eq!(plan.as_slice(), [Action::Rotate]);
    }

    #[test]
    fn matching_position_needs_no_moves() {
        let piece = Piece::new(ShapeKind::O);
        let plan = plan_moves(piece, &placement(0, piece.x()));
        assert!(plan.is_empty());
    }

    #[test]
    fn the_widest_plan_fits() {
        let piece = Piece::new(ShapeKind::L);
        let plan = plan_moves(piece, &placement(3, piece.x() - 3));
        assert_eq!(plan.len(), 6);
        assert!(plan.capacity() >= MAX_PLAN_LEN);
    }
}
