use crate::choice::{Outcome, Player};

/// Rounds won per player for the lifetime of the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    p1: u64,
    p2: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, player: Player) -> u64 {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }

    /// Credit the winner of `outcome`. Returns true when a score moved.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::P1Wins => self.p1 += 1,
            Outcome::P2Wins => self.p2 += 1,
            Outcome::Draw | Outcome::Undecided => return false,
        }
        true
    }
}
