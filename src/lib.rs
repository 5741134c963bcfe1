// Library surface for headless/integration tests and reuse.
// Terminal drawing stays in the binary; everything here runs without a TTY.
pub mod app_dirs;
pub mod choice;
pub mod clock;
pub mod config;
pub mod game;
pub mod keymap;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod score;
pub mod view;

pub use choice::{resolve, Choice, Outcome, Player};
pub use game::{Changes, Game, GameObserver};
