use thiserror::Error;

use crate::{CardCount, Side};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidCardIndex,
    #[error("A {size}x{size} board cannot hold exactly {pairs} pairs")]
    InvalidBoardShape { size: Side, pairs: CardCount },
    #[error("Board needs {pairs} symbols but the pool only has {pool}")]
    SymbolPoolExhausted { pairs: CardCount, pool: usize },
    #[error("Deck must hold every board symbol exactly twice")]
    InvalidDeck,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
