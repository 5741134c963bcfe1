use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rps_duel::clock::{Clock, ManualClock};
use rps_duel::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use rps_duel::view::ScoreView;
use rps_duel::{Game, Outcome};

fn key(c: char, at_ms: u64) -> GameEvent {
    GameEvent::Key {
        key: KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
        at_ms,
    }
}

/// Drain the runner into the game until it goes quiet
fn drive(runner: &Runner<TestEventSource, FixedTicker>, game: &mut Game) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick | GameEvent::Closed => break,
            GameEvent::Resize => {}
            GameEvent::Key { key, at_ms } => {
                if let KeyCode::Char(c) = key.code {
                    if game.handle_key(c, at_ms).any() {
                        outcomes.push(game.last_outcome());
                    }
                }
            }
        }
    }
    outcomes
}

// Headless integration using the internal runtime + Game without a TTY
#[test]
fn headless_match_flow() {
    let mut game = Game::default();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    // round 1: paper beats rock
    tx.send(key('s', 1_000)).unwrap();
    tx.send(key('4', 1_120)).unwrap();
    // round 2: stray keys, then scissors beats paper
    tx.send(key('q', 2_000)).unwrap();
    tx.send(key('5', 2_010)).unwrap();
    tx.send(GameEvent::Resize).unwrap();
    tx.send(key('d', 2_200)).unwrap();
    // round 3: draw
    tx.send(key('6', 3_000)).unwrap();
    tx.send(key('d', 3_000)).unwrap();

    let outcomes = drive(&runner, &mut game);

    assert_eq!(
        outcomes,
        vec![
            Outcome::Undecided,
            Outcome::P1Wins,
            Outcome::Undecided,
            Outcome::P1Wins,
            Outcome::Undecided,
            Outcome::Draw,
        ]
    );
    assert_eq!(game.score_view(), ScoreView { p1: 2, p2: 0 });
}

#[test]
fn headless_late_partner_then_rematch() {
    let clock = ManualClock::new(0);
    let mut game = Game::default();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key('a', clock.now_ms())).unwrap();
    clock.advance(301);
    tx.send(key('5', clock.now_ms())).unwrap();
    clock.advance(200);
    tx.send(key('d', clock.now_ms())).unwrap();

    let outcomes = drive(&runner, &mut game);

    // the first rock is too early, the late paper waits and loses to scissors
    assert_eq!(outcomes.last(), Some(&Outcome::P1Wins));
    assert_eq!(game.score_view(), ScoreView { p1: 1, p2: 0 });
}

#[test]
fn headless_idle_runner_only_ticks() {
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );
    let mut game = Game::default();

    assert!(drive(&runner, &mut game).is_empty());
    assert_eq!(game.last_outcome(), Outcome::Undecided);
}

#[test]
fn headless_reader_hangup_ends_the_loop() {
    let (tx, rx) = mpsc::channel();
    tx.send(key('s', 0)).unwrap();
    tx.send(key('4', 30)).unwrap();
    drop(tx);
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_secs(5)),
    );
    let mut game = Game::default();

    assert_eq!(drive(&runner, &mut game), vec![Outcome::Undecided, Outcome::P1Wins]);
    assert!(matches!(runner.step(), GameEvent::Closed));
    assert_eq!(game.score_view(), ScoreView { p1: 1, p2: 0 });
}
