use log::debug;

use crate::choice::{resolve, Choice, Outcome, Player};

/// Maximum gap between the two players' inputs for a round to count
pub const DEFAULT_TOLERANCE_MS: u64 = 300;

/// A recorded key press not yet consumed by a decided round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInput {
    pub choice: Choice,
    pub timestamp_ms: u64,
}

/// The last round that produced a winner or a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecidedRound {
    pub p1: Choice,
    pub p2: Choice,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Empty,
    P1Pending,
    P2Pending,
    BothPending,
}

/// Pending inputs for both players plus the most recent decided round.
///
/// `record_input` moves towards `BothPending`; `try_resolve` either decides the
/// round and drops back to `Empty`, or, when the two inputs are too far apart,
/// drops the earlier one and leaves the later one waiting for a new partner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    p1: Option<PendingInput>,
    p2: Option<PendingInput>,
    last_decided: Option<DecidedRound>,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self, player: Player) -> Option<PendingInput> {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }

    pub fn last_decided(&self) -> Option<DecidedRound> {
        self.last_decided
    }

    pub fn phase(&self) -> RoundPhase {
        match (self.p1, self.p2) {
            (None, None) => RoundPhase::Empty,
            (Some(_), None) => RoundPhase::P1Pending,
            (None, Some(_)) => RoundPhase::P2Pending,
            (Some(_), Some(_)) => RoundPhase::BothPending,
        }
    }

    /// Overwrite `player`'s pending input. The other player is untouched.
    pub fn record_input(&mut self, player: Player, choice: Choice, timestamp_ms: u64) {
        let input = PendingInput {
            choice,
            timestamp_ms,
        };
        debug!("{player} pending {choice} at {timestamp_ms}ms");

        match player {
            Player::P1 => self.p1 = Some(input),
            Player::P2 => self.p2 = Some(input),
        }
        // a fresh press starts a new round, the old result is no longer on the table
        self.last_decided = None;
    }

    pub fn try_resolve(&mut self, tolerance_ms: u64) -> Outcome {
        let (p1, p2) = match (self.p1, self.p2) {
            (Some(p1), Some(p2)) => (p1, p2),
            _ => return Outcome::Undecided,
        };

        let gap = p1.timestamp_ms.abs_diff(p2.timestamp_ms);
        if gap > tolerance_ms {
            // the later press stays pending; equal timestamps never get here
            if p1.timestamp_ms < p2.timestamp_ms {
                self.p1 = None;
            } else {
                self.p2 = None;
            }
            debug!("inputs {gap}ms apart (limit {tolerance_ms}ms), dropped the earlier one");
            return Outcome::Undecided;
        }

        let outcome = resolve(p1.choice, p2.choice);
        self.p1 = None;
        self.p2 = None;
        self.last_decided = Some(DecidedRound {
            p1: p1.choice,
            p2: p2.choice,
            outcome,
        });

        outcome
    }
}
