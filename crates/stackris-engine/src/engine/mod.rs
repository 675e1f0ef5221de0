pub use self::{game_field::*, game_session::*, game_stats::*, piece_bag::*};

pub(crate) mod game_field;
pub(crate) mod game_session;
pub(crate) mod game_stats;
pub(crate) mod piece_bag;
