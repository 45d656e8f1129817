use serde::{Deserialize, Serialize};

use crate::{CardCount, Symbol};

/// Face state of a single card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub position: CardCount,
    pub state: CardState,
}

impl Card {
    pub const fn new(symbol: Symbol, position: CardCount) -> Self {
        Self {
            symbol,
            position,
            state: CardState::Hidden,
        }
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CardState::Hidden)
    }

    pub const fn is_matched(&self) -> bool {
        matches!(self.state, CardState::Matched)
    }
}
