use std::fmt;

use log::{info, trace};

use crate::choice::{Choice, Outcome, Player};
use crate::keymap;
use crate::round::{RoundState, DEFAULT_TOLERANCE_MS};
use crate::score::ScoreLedger;
use crate::view::{round_view, score_view, CardView, RoundStatus, RoundView, ScoreView};

/// Receives view models after each state transition has fully completed.
/// Score notifications only fire when a score actually moved.
pub trait GameObserver {
    fn on_round_changed(&mut self, _view: &RoundView) {}
    fn on_score_changed(&mut self, _view: &ScoreView) {}
}

/// Writes decided rounds and score changes to the log
#[derive(Debug, Default)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn on_round_changed(&mut self, view: &RoundView) {
        if let RoundStatus::Decided(outcome) = view.status {
            let hand = |card: Option<CardView>| card.map(|c| c.choice.to_string());
            info!(
                "round decided: {outcome:?} ({} vs {})",
                hand(view.p1).unwrap_or_default(),
                hand(view.p2).unwrap_or_default()
            );
        }
    }

    fn on_score_changed(&mut self, view: &ScoreView) {
        info!("score {view}");
    }
}

/// Which views a transition invalidated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub round: bool,
    pub score: bool,
}

impl Changes {
    pub fn any(&self) -> bool {
        self.round || self.score
    }
}

/// Owns the session: pending round, score ledger, and whoever is watching.
/// Every key event goes through `handle_key` one at a time, so recording an
/// input and resolving the round always happen as a single step.
pub struct Game {
    round: RoundState,
    ledger: ScoreLedger,
    tolerance_ms: u64,
    last_outcome: Outcome,
    observers: Vec<Box<dyn GameObserver>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("round", &self.round)
            .field("ledger", &self.ledger)
            .field("tolerance_ms", &self.tolerance_ms)
            .field("last_outcome", &self.last_outcome)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_MS)
    }
}

impl Game {
    pub fn new(tolerance_ms: u64) -> Self {
        Self {
            round: RoundState::new(),
            ledger: ScoreLedger::new(),
            tolerance_ms,
            last_outcome: Outcome::Undecided,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub fn tolerance_ms(&self) -> u64 {
        self.tolerance_ms
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Outcome of the most recent resolution attempt
    pub fn last_outcome(&self) -> Outcome {
        self.last_outcome
    }

    pub fn round_view(&self) -> RoundView {
        round_view(&self.round)
    }

    pub fn score_view(&self) -> ScoreView {
        score_view(&self.ledger)
    }

    /// Feed one raw key press. Keys outside the fixed bindings change nothing.
    pub fn handle_key(&mut self, key: char, at_ms: u64) -> Changes {
        match keymap::lookup(key) {
            Some((player, choice)) => self.play(player, choice, at_ms),
            None => {
                trace!("ignoring key {key:?}");
                Changes::default()
            }
        }
    }

    /// Record `player`'s hand, try to settle the round, then notify.
    pub fn play(&mut self, player: Player, choice: Choice, at_ms: u64) -> Changes {
        let before = self.round.clone();

        self.round.record_input(player, choice, at_ms);
        let outcome = self.round.try_resolve(self.tolerance_ms);
        self.last_outcome = outcome;

        let changes = Changes {
            round: self.round != before,
            score: self.ledger.apply(outcome),
        };

        self.notify(changes);
        changes
    }

    fn notify(&mut self, changes: Changes) {
        if !changes.any() || self.observers.is_empty() {
            return;
        }

        let round = self.round_view();
        let score = self.score_view();
        for observer in self.observers.iter_mut() {
            if changes.round {
                observer.on_round_changed(&round);
            }
            if changes.score {
                observer.on_score_changed(&score);
            }
        }
    }
}
