use alloc::vec::Vec;

use super::*;

/// Purely random deal: the first `pairs` symbols of the pool, each twice,
/// in a Fisher-Yates shuffled order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, board: BoardConfig) -> Deck {
        use rand::prelude::*;

        assert!(
            board.is_valid(),
            "board config {board:?} cannot be dealt from a pool of {}",
            SYMBOL_POOL.len()
        );

        let mut symbols: Vec<Symbol> = (0..board.pairs)
            .flat_map(|pair| {
                let symbol = Symbol(pair as u8);
                [symbol, symbol]
            })
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        symbols.shuffle(&mut rng);
        log::trace!("dealt {} cards from seed {}", symbols.len(), self.seed);

        Deck::dealt(board, &symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_difficulty_deals_two_of_each_leading_symbol() {
        for difficulty in Difficulty::ALL {
            let board = difficulty.board();
            let deck = generate(difficulty, 7);

            assert_eq!(deck.len(), usize::from(board.pairs) * 2);
            let mut counts = alloc::vec![0usize; SYMBOL_POOL.len()];
            for symbol in deck.symbols() {
                counts[symbol.index()] += 1;
            }
            for (index, &count) in counts.iter().enumerate() {
                let expected = if index < usize::from(board.pairs) { 2 } else { 0 };
                assert_eq!(count, expected, "{difficulty} symbol {index}");
            }
            assert!(deck.cards().iter().all(Card::is_hidden));
            for (position, card) in deck.cards().iter().enumerate() {
                assert_eq!(usize::from(card.position), position);
            }
        }
    }

    #[test]
    fn same_seed_deals_same_deck() {
        let a = generate(Difficulty::Medium, 1234);
        let b = generate(Difficulty::Medium, 1234);
        let c = generate(Difficulty::Medium, 1235);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shuffle_spreads_every_symbol_evenly_over_every_position() {
        const TRIALS: u64 = 16_000;
        let board = Difficulty::Easy.board();
        let cells = usize::from(board.total_cells());
        let pairs = usize::from(board.pairs);

        let mut hits = alloc::vec![0u32; cells * pairs];
        for seed in 0..TRIALS {
            let deck = RandomDeckGenerator::new(seed).generate(board);
            for (position, symbol) in deck.symbols().enumerate() {
                hits[position * pairs + symbol.index()] += 1;
            }
        }

        // each cell holds a given symbol with probability 2 / cells
        let expected = (TRIALS as f64) * 2.0 / (cells as f64);
        for (slot, &count) in hits.iter().enumerate() {
            let count = f64::from(count);
            let spread = if count > expected { count - expected } else { expected - count };
            let deviation = spread / expected;
            assert!(
                deviation < 0.15,
                "position {} symbol {} hit {} times, expected about {}",
                slot / pairs,
                slot % pairs,
                count,
                expected
            );
        }
    }

    #[test]
    #[should_panic]
    fn unchecked_invalid_board_is_fatal() {
        RandomDeckGenerator::new(0).generate(BoardConfig::new_unchecked(3, 4));
    }
}
