use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Final time and move count of a won round. Also the persisted best.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub time: u32,
    pub moves: u32,
}

impl Score {
    pub const fn new(time: u32, moves: u32) -> Self {
        Self { time, moves }
    }

    /// Whether this score should replace `best`: faster wins, fewer moves
    /// break a tie on time.
    pub fn beats(&self, best: Option<&Score>) -> bool {
        best.is_none_or(|best| self.cmp(best).is_lt())
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.moves.cmp(&other.moves))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    #[default]
    Waiting,
    Running,
    Stopped,
}

/// Whole-second round clock. Starts on the first flip, stops for good on the win.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    elapsed_secs: u32,
    state: ClockState,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running)
    }

    /// Returns `true` only on the call that actually started the clock.
    pub fn start(&mut self) -> bool {
        if matches!(self.state, ClockState::Waiting) {
            self.state = ClockState::Running;
            true
        } else {
            false
        }
    }

    /// One elapsed second. Ignored unless running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }
}
