//! Placement planning for the self-playing engine.
//!
//! [`board_metrics`] measures a stack (heights, holes, bumpiness),
//! [`placement`] searches every rotation and column for the best-scoring
//! drop, and [`move_plan`] turns the winner into the action sequence the
//! session consumes one step per frame.

pub mod board_metrics;
pub mod move_plan;
pub mod placement;

pub use self::{
    move_plan::{MAX_PLAN_LEN, plan_moves},
    placement::{Placement, best_placement, score_board},
};
