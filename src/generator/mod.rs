use crate::*;
use ndarray::Array2;

pub use random::*;

mod random;

/// Mine-placement strategy. All randomness lives behind this seam so a round
/// can be replayed deterministically from a seed.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool>;
}
