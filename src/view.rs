use std::fmt;

use crate::choice::{Choice, Outcome, Player};
use crate::round::{RoundPhase, RoundState};
use crate::score::ScoreLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Highlight,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    pub choice: Choice,
    pub border: Border,
}

impl CardView {
    pub fn is_highlighted(&self) -> bool {
        self.border == Border::Highlight
    }
}

/// What the status line says about the round in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Nobody has pressed anything since the last decided round (or startup)
    Idle,
    /// One player is in, waiting for the other
    Awaiting(Player),
    BothIn,
    Decided(Outcome),
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStatus::Idle => write!(f, "ready - throw!"),
            RoundStatus::Awaiting(player) => write!(f, "waiting for {player}"),
            RoundStatus::BothIn => write!(f, "both in"),
            RoundStatus::Decided(Outcome::P1Wins) => write!(f, "P1 wins the round"),
            RoundStatus::Decided(Outcome::P2Wins) => write!(f, "P2 wins the round"),
            RoundStatus::Decided(Outcome::Draw) => write!(f, "draw"),
            // decided rounds only ever hold a resolver outcome
            RoundStatus::Decided(Outcome::Undecided) => write!(f, "no decision"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundView {
    pub p1: Option<CardView>,
    pub p2: Option<CardView>,
    pub status: RoundStatus,
}

impl RoundView {
    pub fn card(&self, player: Player) -> Option<CardView> {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreView {
    pub p1: u64,
    pub p2: u64,
}

impl fmt::Display for ScoreView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P1 {}  :  {} P2", self.p1, self.p2)
    }
}

/// Project the round into cards. Pending presses show as neutral cards; once a
/// round is decided both hands stay on screen, the winner's card highlighted,
/// until somebody presses again.
pub fn round_view(state: &RoundState) -> RoundView {
    if let Some(decided) = state.last_decided() {
        let winner = decided.outcome.winner();
        let card = |player: Player, choice: Choice| CardView {
            choice,
            border: if winner == Some(player) {
                Border::Highlight
            } else {
                Border::Neutral
            },
        };

        return RoundView {
            p1: Some(card(Player::P1, decided.p1)),
            p2: Some(card(Player::P2, decided.p2)),
            status: RoundStatus::Decided(decided.outcome),
        };
    }

    let pending_card = |player: Player| {
        state.pending(player).map(|input| CardView {
            choice: input.choice,
            border: Border::Neutral,
        })
    };

    let status = match state.phase() {
        RoundPhase::Empty => RoundStatus::Idle,
        RoundPhase::P1Pending => RoundStatus::Awaiting(Player::P2),
        RoundPhase::P2Pending => RoundStatus::Awaiting(Player::P1),
        RoundPhase::BothPending => RoundStatus::BothIn,
    };

    RoundView {
        p1: pending_card(Player::P1),
        p2: pending_card(Player::P2),
        status,
    }
}

pub fn score_view(ledger: &ScoreLedger) -> ScoreView {
    ScoreView {
        p1: ledger.score(Player::P1),
        p2: ledger.score(Player::P2),
    }
}
