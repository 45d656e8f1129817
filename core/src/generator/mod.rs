use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, board: BoardConfig) -> Deck;
}

/// Deals a fresh shuffled deck for `difficulty`.
pub fn generate(difficulty: Difficulty, seed: u64) -> Deck {
    RandomDeckGenerator::new(seed).generate(difficulty.board())
}
