/// Points awarded per simultaneous line clear, multiplied by `level + 1`.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Slowest fall delay, at level 0.
const BASE_FALL_DELAY_MS: u64 = 600;
/// Delay reduction per level.
const FALL_DELAY_STEP_MS: u64 = 50;
/// Fastest fall delay the level curve can reach.
const MIN_FALL_DELAY_MS: u64 = 100;

/// Score, level, and line bookkeeping for a session.
///
/// All counters are monotonically non-decreasing. The level is a pure
/// function of total cleared lines (one level per 10 lines) and the fall
/// delay is a pure function of the level; neither influences the placement
/// search.
#[derive(Debug, Clone)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level: one per 10 total cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of drops by lines cleared (index 0 = no clear, 4 = quad).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Milliseconds between gravity steps at the current level.
    #[must_use]
    pub fn fall_delay_ms(&self) -> u64 {
        let level = u64::try_from(self.level()).unwrap_or(u64::MAX);
        u64::max(
            MIN_FALL_DELAY_MS,
            BASE_FALL_DELAY_MS.saturating_sub(level * FALL_DELAY_STEP_MS),
        )
    }

    /// Updates the counters after a piece locks.
    ///
    /// The line award uses the level from before this clear; the level then
    /// catches up with the new line total.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        let award_level = self.level();
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += SCORE_TABLE[cleared_lines] * (award_level + 1);
    }
}
