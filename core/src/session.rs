use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one dealt round inside a session.
pub type RoundId = u64;

/// Counters and selections of the current round, as shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub first_selected: Option<CardCount>,
    pub second_selected: Option<CardCount>,
    pub locked: bool,
    pub matched_pairs: CardCount,
    pub moves: u32,
    pub elapsed_secs: u32,
}

/// Handle for a scheduled mismatch settle. Only valid for the round that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleTicket {
    pub round: RoundId,
    pub pending: PendingMismatch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WinSummary {
    pub difficulty: Difficulty,
    pub score: Score,
    pub best: Score,
    pub is_new_best: bool,
}

/// What a flip did, from the point of view of whoever schedules timers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Ignored(IgnoreReason),
    Selected,
    Matched,
    /// Call [`GameSession::settle`] with the ticket after [`SETTLE_DELAY_MS`].
    Mismatched(SettleTicket),
    Won(WinSummary),
}

impl Turn {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// One player's game: the current round plus everything that outlives it.
#[derive(Debug)]
pub struct GameSession<S, F> {
    difficulty: Difficulty,
    round: RoundId,
    engine: FlipEngine,
    clock: RoundClock,
    best: Option<Score>,
    summary: Option<WinSummary>,
    store: GameStore<S>,
    feedback: FeedbackDispatcher<F>,
}

impl<S: KeyValueStore, F: FeedbackSink> GameSession<S, F> {
    pub fn new(difficulty: Difficulty, seed: u64, store: S, sink: F) -> Self {
        let store = GameStore::new(store);
        let feedback = FeedbackDispatcher::new(sink, store.sound());
        Self {
            difficulty,
            round: 0,
            engine: FlipEngine::new(generate(difficulty, seed)),
            clock: RoundClock::new(),
            best: store.load(difficulty),
            summary: None,
            store,
            feedback,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn engine(&self) -> &FlipEngine {
        &self.engine
    }

    pub fn cards(&self) -> &[Card] {
        self.engine.cards()
    }

    pub fn board(&self) -> BoardConfig {
        self.engine.board()
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn best(&self) -> Option<Score> {
        self.best
    }

    pub fn summary(&self) -> Option<WinSummary> {
        self.summary
    }

    pub fn sound(&self) -> SoundSetting {
        self.feedback.sound()
    }

    pub fn store(&self) -> &GameStore<S> {
        &self.store
    }

    pub fn feedback(&self) -> &FeedbackDispatcher<F> {
        &self.feedback
    }

    pub fn round_state(&self) -> RoundState {
        RoundState {
            first_selected: self.engine.first_selected(),
            second_selected: self.engine.second_selected(),
            locked: self.engine.is_locked(),
            matched_pairs: self.engine.matched_pairs(),
            moves: self.engine.moves(),
            elapsed_secs: self.clock.elapsed_secs(),
        }
    }

    pub fn flip(&mut self, index: CardCount) -> Result<Turn> {
        let outcome = self.engine.flip(index)?;
        if let FlipOutcome::Ignored(reason) = outcome {
            log::trace!("flip {} ignored: {:?}", index, reason);
            return Ok(Turn::Ignored(reason));
        }

        if self.clock.start() {
            log::debug!("round {} clock started", self.round);
        }
        self.feedback.dispatch(Cue::Flip);

        Ok(match outcome {
            FlipOutcome::Ignored(reason) => Turn::Ignored(reason),
            FlipOutcome::Selected => Turn::Selected,
            FlipOutcome::Matched => {
                self.feedback.dispatch(Cue::Match);
                Turn::Matched
            }
            FlipOutcome::Mismatched(pending) => {
                self.feedback.dispatch(Cue::Wrong);
                Turn::Mismatched(SettleTicket {
                    round: self.round,
                    pending,
                })
            }
            FlipOutcome::Won => {
                self.feedback.dispatch(Cue::Match);
                let summary = self.finish();
                self.feedback.dispatch(Cue::Win);
                Turn::Won(summary)
            }
        })
    }

    /// Turns a mismatch back over. Tickets from earlier rounds are dropped.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if ticket.round != self.round {
            log::debug!(
                "dropping settle for round {} in round {}",
                ticket.round,
                self.round
            );
            return false;
        }
        self.engine.settle(ticket.pending)
    }

    /// One second of wall time.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    /// Deals a new round at the current difficulty.
    pub fn restart(&mut self, seed: u64) {
        self.new_round(self.difficulty, seed);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty, seed: u64) {
        self.new_round(difficulty, seed);
    }

    pub fn toggle_sound(&mut self) -> SoundSetting {
        let sound = self.feedback.sound().toggled();
        self.feedback.set_sound(sound);
        if let Err(err) = self.store.set_sound(sound) {
            log::error!("Could not save sound setting: {}", err);
        }
        sound
    }

    fn new_round(&mut self, difficulty: Difficulty, seed: u64) {
        self.round = self.round.wrapping_add(1);
        self.difficulty = difficulty;
        self.engine = FlipEngine::new(generate(difficulty, seed));
        self.clock = RoundClock::new();
        self.summary = None;
        self.best = self.store.load(difficulty);
        log::debug!("round {} dealt: {} seed {}", self.round, difficulty, seed);
    }

    fn finish(&mut self) -> WinSummary {
        self.clock.stop();
        let score = Score::new(self.clock.elapsed_secs(), self.engine.moves());
        let submission = self.store.submit(self.difficulty, score);
        self.best = Some(submission.best);

        let summary = WinSummary {
            difficulty: self.difficulty,
            score,
            best: submission.best,
            is_new_best: submission.is_new_best,
        };
        log::debug!("round {} won: {:?}", self.round, summary);
        self.summary = Some(summary);
        summary
    }
}
