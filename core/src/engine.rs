use serde::{Deserialize, Serialize};

use crate::*;

/// Selection phase of the flip state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipPhase {
    #[default]
    Idle,
    OneSelected { first: CardCount },
    /// A mismatch is on the table; input is locked until it settles.
    Resolving { first: CardCount, second: CardCount },
}

impl FlipPhase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Resolving { .. })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Arbitrates flips over one dealt deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipEngine {
    deck: Deck,
    phase: FlipPhase,
    matched_pairs: CardCount,
    moves: u32,
    state: EngineState,
}

impl FlipEngine {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            phase: FlipPhase::Idle,
            matched_pairs: 0,
            moves: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    pub fn phase(&self) -> FlipPhase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn board(&self) -> BoardConfig {
        self.deck.board()
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn card_at(&self, index: CardCount) -> Option<Card> {
        self.deck.get(index).copied()
    }

    pub fn pair_count(&self) -> CardCount {
        self.deck.pair_count()
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn first_selected(&self) -> Option<CardCount> {
        match self.phase {
            FlipPhase::Idle => None,
            FlipPhase::OneSelected { first } | FlipPhase::Resolving { first, .. } => Some(first),
        }
    }

    pub fn second_selected(&self) -> Option<CardCount> {
        match self.phase {
            FlipPhase::Resolving { second, .. } => Some(second),
            _ => None,
        }
    }

    /// Cards currently face up but not matched.
    pub fn revealed_count(&self) -> usize {
        self.cards()
            .iter()
            .filter(|card| card.state == CardState::Revealed)
            .count()
    }

    pub fn pending_mismatch(&self) -> Option<PendingMismatch> {
        match self.phase {
            FlipPhase::Resolving { first, second } => Some(PendingMismatch { first, second }),
            _ => None,
        }
    }

    pub fn flip(&mut self, index: CardCount) -> Result<FlipOutcome> {
        use FlipOutcome::*;
        use IgnoreReason::*;

        let card = self.card_at(index).ok_or(GameError::InvalidCardIndex)?;

        if self.state.is_finished() {
            return Ok(Ignored(Finished));
        }

        Ok(match self.phase {
            FlipPhase::Resolving { .. } => Ignored(Locked),
            FlipPhase::OneSelected { first } if first == index => Ignored(SameCard),
            _ if !card.is_hidden() => Ignored(NotHidden),
            FlipPhase::Idle => {
                self.reveal(index);
                self.phase = FlipPhase::OneSelected { first: index };
                self.mark_started();
                Selected
            }
            FlipPhase::OneSelected { first } => {
                self.reveal(index);
                self.moves = self.moves.saturating_add(1);
                self.resolve(first, index)
            }
        })
    }

    /// Turns a settled mismatch back over and unlocks input.
    ///
    /// Returns `false` when `pending` is not the mismatch on the table.
    pub fn settle(&mut self, pending: PendingMismatch) -> bool {
        if self.pending_mismatch() != Some(pending) {
            return false;
        }

        for index in [pending.first, pending.second] {
            if let Some(card) = self.deck.card_mut(index) {
                card.state = CardState::Hidden;
            }
        }
        self.phase = FlipPhase::Idle;
        true
    }

    fn resolve(&mut self, first: CardCount, second: CardCount) -> FlipOutcome {
        let is_match = self.deck[first].symbol == self.deck[second].symbol;

        if !is_match {
            log::debug!("mismatch: {} and {}", first, second);
            self.phase = FlipPhase::Resolving { first, second };
            return FlipOutcome::Mismatched(PendingMismatch { first, second });
        }

        for index in [first, second] {
            if let Some(card) = self.deck.card_mut(index) {
                card.state = CardState::Matched;
            }
        }
        self.matched_pairs += 1;
        self.phase = FlipPhase::Idle;
        log::debug!(
            "matched {} ({}/{})",
            self.deck[first].symbol,
            self.matched_pairs,
            self.pair_count()
        );

        if self.matched_pairs == self.pair_count() {
            self.state = EngineState::Won;
            FlipOutcome::Won
        } else {
            FlipOutcome::Matched
        }
    }

    fn reveal(&mut self, index: CardCount) {
        if let Some(card) = self.deck.card_mut(index) {
            card.state = CardState::Revealed;
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = EngineState::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 board dealt as `[A, B, A, B]`.
    fn small_engine() -> FlipEngine {
        let board = BoardConfig::new(2, 2).unwrap();
        let deck = Deck::from_symbols(board, &[Symbol(0), Symbol(1), Symbol(0), Symbol(1)]).unwrap();
        FlipEngine::new(deck)
    }

    #[test]
    fn first_flip_selects_and_reveals() {
        let mut engine = small_engine();

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::Selected);
        assert_eq!(engine.phase(), FlipPhase::OneSelected { first: 0 });
        assert_eq!(engine.card_at(0).unwrap().state, CardState::Revealed);
        assert_eq!(engine.state(), EngineState::Active);
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn flipping_the_selected_card_again_is_ignored() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();

        assert_eq!(
            engine.flip(0).unwrap(),
            FlipOutcome::Ignored(IgnoreReason::SameCard)
        );
        assert_eq!(engine.phase(), FlipPhase::OneSelected { first: 0 });
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn matching_pair_returns_to_idle_without_lock() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();

        assert_eq!(engine.flip(2).unwrap(), FlipOutcome::Matched);
        assert_eq!(engine.phase(), FlipPhase::Idle);
        assert!(!engine.is_locked());
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.moves(), 1);
        assert!(engine.card_at(0).unwrap().is_matched());
        assert!(engine.card_at(2).unwrap().is_matched());
    }

    #[test]
    fn mismatch_locks_until_settled() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();

        let FlipOutcome::Mismatched(pending) = engine.flip(1).unwrap() else {
            panic!("expected a mismatch");
        };
        assert!(engine.is_locked());
        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.revealed_count(), 2);

        let before = engine.clone();
        for index in 0..4 {
            assert_eq!(
                engine.flip(index).unwrap(),
                FlipOutcome::Ignored(IgnoreReason::Locked)
            );
        }
        assert_eq!(engine, before);

        assert!(engine.settle(pending));
        assert!(!engine.is_locked());
        assert_eq!(engine.phase(), FlipPhase::Idle);
        assert_eq!(engine.revealed_count(), 0);
        assert!(!engine.settle(pending));
    }

    #[test]
    fn matched_cards_cannot_be_flipped() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();
        engine.flip(2).unwrap();

        assert_eq!(
            engine.flip(2).unwrap(),
            FlipOutcome::Ignored(IgnoreReason::NotHidden)
        );
        engine.flip(1).unwrap();
        assert_eq!(
            engine.flip(0).unwrap(),
            FlipOutcome::Ignored(IgnoreReason::NotHidden)
        );
        assert_eq!(engine.card_at(0).unwrap().state, CardState::Matched);
    }

    #[test]
    fn last_pair_wins_and_freezes_the_board() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();
        engine.flip(2).unwrap();
        engine.flip(3).unwrap();

        assert_eq!(engine.flip(1).unwrap(), FlipOutcome::Won);
        assert!(engine.is_won());
        assert_eq!(engine.moves(), 2);
        assert_eq!(
            engine.flip(1).unwrap(),
            FlipOutcome::Ignored(IgnoreReason::Finished)
        );
    }

    #[test]
    fn out_of_range_flip_is_an_error() {
        let mut engine = small_engine();
        assert_eq!(engine.flip(4), Err(GameError::InvalidCardIndex));
    }

    #[test]
    fn settle_with_foreign_pair_is_rejected() {
        let mut engine = small_engine();
        engine.flip(0).unwrap();
        engine.flip(1).unwrap();

        assert!(!engine.settle(PendingMismatch { first: 2, second: 3 }));
        assert!(engine.is_locked());
    }
}
