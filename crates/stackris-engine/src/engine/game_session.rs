use std::{collections::VecDeque, time::Duration};

use derive_more::IsVariant;

use super::{game_field::GameField, game_stats::GameStats, piece_bag::PieceBag};

/// One step of the falling piece, applied at most once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rotate,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Frame-driven session: applies queued actions and gravity to a
/// [`GameField`] and keeps [`GameStats`] up to date.
///
/// Each frame consumes at most one queued action, then advances gravity on
/// the level's fall-delay schedule. A resting piece does not lock while
/// actions are still queued, so a freshly planned placement always finishes
/// its moves before the piece settles.
#[derive(Debug)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    state: SessionState,
    fps: u64,
    total_frames: u64,
    frames_until_drop: u64,
    move_queue: VecDeque<Action>,
}

impl GameSession {
    #[must_use]
    pub fn new(fps: u64, bag: PieceBag) -> Self {
        let stats = GameStats::new();
        let frames_until_drop = frames_per_drop(stats.fall_delay_ms(), fps);
        Self {
            field: GameField::new(bag),
            stats,
            state: SessionState::Playing,
            fps,
            total_frames: 0,
            frames_until_drop,
            move_queue: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.move_queue.len()
    }

    /// Wall-clock play time implied by the frame counter.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.total_frames * 1000 / self.fps)
    }

    /// Appends actions to the move queue, one to be consumed per frame.
    pub fn queue_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.move_queue.extend(actions);
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Advances the session by one frame.
    pub fn increment_frame(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.total_frames += 1;
        self.apply_queued_action();
        self.apply_gravity();
    }

    /// Consumes and applies at most one queued action.
    ///
    /// An action that would collide is dropped without effect; the plan keeps
    /// consuming one entry per frame either way.
    fn apply_queued_action(&mut self) {
        let Some(action) = self.move_queue.pop_front() else {
            return;
        };
        let piece = self.field.falling_piece();
        let moved = match action {
            Action::Rotate => piece.rotated(),
            Action::Left => piece.left(),
            Action::Right => piece.right(),
        };
        let _ = self.field.set_falling_piece(moved);
    }

    fn apply_gravity(&mut self) {
        self.frames_until_drop = self.frames_until_drop.saturating_sub(1);
        if self.frames_until_drop > 0 {
            return;
        }
        self.frames_until_drop = frames_per_drop(self.stats.fall_delay_ms(), self.fps);

        if self.field.apply_gravity_step() {
            return;
        }
        // Resting, but pending actions get a chance to slide the piece first.
        if !self.move_queue.is_empty() {
            return;
        }
        let (cleared_lines, spawn) = self.field.lock_and_spawn();
        self.stats.complete_piece_drop(cleared_lines);
        if spawn.is_err() {
            self.state = SessionState::GameOver;
        }
    }
}

/// Frames between gravity steps for a given fall delay, at least one.
fn frames_per_drop(fall_delay_ms: u64, fps: u64) -> u64 {
    u64::max(1, fall_delay_ms * fps / 1000)
}
