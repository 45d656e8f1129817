#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use feedback::*;
pub use generator::*;
pub use scoring::*;
pub use session::*;
pub use store::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod feedback;
mod generator;
mod scoring;
mod session;
mod store;
mod types;

/// Pause after a mismatch before both cards turn back over.
pub const SETTLE_DELAY_MS: u32 = 600;

/// Period of the round clock.
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Pause between the winning match and the completion summary.
pub const WIN_SUMMARY_DELAY_MS: u32 = 500;

/// Shape of a square board: `size` tiles per side holding `pairs` pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Side,
    pub pairs: CardCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Side, pairs: CardCount) -> Self {
        Self { size, pairs }
    }

    pub fn new(size: Side, pairs: CardCount) -> Result<Self> {
        let config = Self::new_unchecked(size, pairs);
        if pairs == 0 || config.total_cells() != pairs.saturating_mul(2) {
            return Err(GameError::InvalidBoardShape { size, pairs });
        }
        if usize::from(pairs) > SYMBOL_POOL.len() {
            return Err(GameError::SymbolPoolExhausted {
                pairs,
                pool: SYMBOL_POOL.len(),
            });
        }
        Ok(config)
    }

    pub const fn total_cells(&self) -> CardCount {
        mult(self.size, self.size)
    }

    /// Whether the board is square-complete and the symbol pool can cover it.
    pub const fn is_valid(&self) -> bool {
        self.pairs > 0
            && self.total_cells() == self.pairs.saturating_mul(2)
            && (self.pairs as usize) <= SYMBOL_POOL.len()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn board(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Easy => BoardConfig::new_unchecked(4, 8),
            Medium => BoardConfig::new_unchecked(6, 18),
            Hard => BoardConfig::new_unchecked(8, 32),
        }
    }

    /// Identifier used in storage keys and in the difficulty selector.
    pub const fn id(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy (4x4)",
            Medium => "Medium (6x6)",
            Hard => "Hard (8x8)",
        }
    }
}

const _: () = {
    let mut i = 0;
    while i < Difficulty::ALL.len() {
        assert!(
            Difficulty::ALL[i].board().is_valid(),
            "built-in difficulty has an invalid board"
        );
        i += 1;
    }
};

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.id().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Ordered cards of one round, exactly two per symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    board: BoardConfig,
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck from symbols already in deal order.
    ///
    /// The symbols must be the first `board.pairs` entries of the pool, each
    /// appearing exactly twice.
    pub fn from_symbols(board: BoardConfig, symbols: &[Symbol]) -> Result<Self> {
        let board = BoardConfig::new(board.size, board.pairs)?;
        if symbols.len() != usize::from(board.total_cells()) {
            return Err(GameError::InvalidDeck);
        }

        let mut seen = alloc::vec![0u8; usize::from(board.pairs)];
        for symbol in symbols {
            let slot = seen
                .get_mut(symbol.index())
                .ok_or(GameError::InvalidDeck)?;
            *slot += 1;
        }
        if seen.iter().any(|&count| count != 2) {
            return Err(GameError::InvalidDeck);
        }

        Ok(Self::dealt(board, symbols))
    }

    pub(crate) fn dealt(board: BoardConfig, symbols: &[Symbol]) -> Self {
        let cards = symbols
            .iter()
            .enumerate()
            .map(|(position, &symbol)| Card::new(symbol, position as CardCount))
            .collect();
        Self { board, cards }
    }

    pub fn board(&self) -> BoardConfig {
        self.board
    }

    pub fn pair_count(&self) -> CardCount {
        self.board.pairs
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: CardCount) -> Option<&Card> {
        self.cards.get(usize::from(index))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cards.iter().map(|card| card.symbol)
    }

    pub(crate) fn card_mut(&mut self, index: CardCount) -> Option<&mut Card> {
        self.cards.get_mut(usize::from(index))
    }
}

impl Index<CardCount> for Deck {
    type Output = Card;

    fn index(&self, index: CardCount) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}

/// Why a flip was dropped without touching the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A mismatch is still settling.
    Locked,
    /// The card is the one already selected.
    SameCard,
    /// The card is face up or matched.
    NotHidden,
    /// Every pair has been found.
    Finished,
}

/// The two cards of a mismatch that still have to be turned back over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMismatch {
    pub first: CardCount,
    pub second: CardCount,
}

/// Outcome of flipping a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored(IgnoreReason),
    Selected,
    Matched,
    Mismatched(PendingMismatch),
    Won,
}

impl FlipOutcome {
    /// Whether this outcome changed the round
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    /// Whether this outcome completed a pair comparison
    pub const fn is_move(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched(_) | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_boards_hold_two_cards_per_pair() {
        for difficulty in Difficulty::ALL {
            let board = difficulty.board();
            assert_eq!(board.total_cells(), board.pairs * 2);
            assert_eq!(BoardConfig::new(board.size, board.pairs), Ok(board));
        }
    }

    #[test]
    fn board_config_rejects_odd_shapes() {
        assert_eq!(
            BoardConfig::new(3, 4),
            Err(GameError::InvalidBoardShape { size: 3, pairs: 4 })
        );
        assert_eq!(
            BoardConfig::new(0, 0),
            Err(GameError::InvalidBoardShape { size: 0, pairs: 0 })
        );
    }

    #[test]
    fn board_config_rejects_boards_larger_than_the_pool() {
        assert_eq!(
            BoardConfig::new(10, 50),
            Err(GameError::SymbolPoolExhausted {
                pairs: 50,
                pool: SYMBOL_POOL.len(),
            })
        );
    }

    #[test]
    fn difficulty_parses_selector_values() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!(" Medium ".parse(), Ok(Difficulty::Medium));
        assert_eq!("hard".parse(), Ok(Difficulty::Hard));
        assert_eq!(
            "impossible".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty)
        );
    }

    #[test]
    fn deck_from_symbols_requires_exact_pairs() {
        let board = BoardConfig::new(2, 2).unwrap();
        let ok = Deck::from_symbols(board, &[Symbol(1), Symbol(0), Symbol(0), Symbol(1)]).unwrap();
        assert_eq!(ok.len(), 4);
        assert_eq!(ok[2].position, 2);

        let triple = [Symbol(0), Symbol(0), Symbol(0), Symbol(1)];
        assert_eq!(Deck::from_symbols(board, &triple), Err(GameError::InvalidDeck));

        let outside = [Symbol(0), Symbol(0), Symbol(5), Symbol(5)];
        assert_eq!(Deck::from_symbols(board, &outside), Err(GameError::InvalidDeck));

        let short = [Symbol(0), Symbol(0)];
        assert_eq!(Deck::from_symbols(board, &short), Err(GameError::InvalidDeck));
    }

    #[test]
    fn flip_outcome_classifies_moves() {
        let pending = PendingMismatch { first: 0, second: 1 };
        assert!(!FlipOutcome::Selected.is_move());
        assert!(FlipOutcome::Mismatched(pending).is_move());
        assert!(FlipOutcome::Won.is_move());
        assert!(!FlipOutcome::Ignored(IgnoreReason::Locked).has_update());
    }
}
