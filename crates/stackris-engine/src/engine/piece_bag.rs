use arrayvec::ArrayVec;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::core::piece::ShapeKind;

/// 7-bag shape randomizer.
///
/// Draws come from a shuffled permutation of all seven shapes; the bag is
/// refilled (fully, never partially) exactly when it runs empty. This bounds
/// the gap between repeats of the same shape: any window of 14 draws starting
/// at a bag boundary contains every shape exactly twice.
///
/// The generator is owned but injected at construction, so a fixed seed gives
/// a fully deterministic draw sequence.
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg64Mcg,
    bag: ArrayVec<ShapeKind, { ShapeKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a bag seeded from the OS random source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a bag with a fixed seed, for deterministic play and tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn from_rng(rng: Pcg64Mcg) -> Self {
        Self {
            rng,
            bag: ArrayVec::new(),
        }
    }

    /// Removes and returns the next shape, refilling the bag when empty.
    pub fn next_kind(&mut self) -> ShapeKind {
        if self.bag.is_empty() {
            self.bag.extend(ShapeKind::ALL);
            self.bag.shuffle(&mut self.rng);
        }
        self.bag.pop().expect("bag was just refilled")
    }
}
