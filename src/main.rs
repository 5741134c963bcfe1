mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    cursor::Show,
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use rps_duel::{
    app_dirs::AppDirs,
    clock::MonotonicClock,
    config::{Config, ConfigStore, FileConfigStore, Palette},
    game::{Changes, Game, LogObserver},
    logging::init_file_logger,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    view::{RoundView, ScoreView},
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};

/// two-player rock paper scissors on one keyboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Two players share one keyboard. Player one throws with a/s/d, player two with 4/5/6 (rock/paper/scissors). A round counts when both presses land within the tolerance window."
)]
pub struct Cli {
    /// max gap in milliseconds between the two presses for a round to count
    #[clap(short = 't', long)]
    tolerance_ms: Option<u64>,

    /// how often the event loop wakes up when idle, in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// file to write logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log verbosity
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command line flags win over whatever the config file says
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ms) = self.tolerance_ms {
            config.tolerance_ms = ms;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        config
    }
}

/// Session state owned by the event loop: the game plus the views last drawn
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub palette: Palette,
    pub round: RoundView,
    pub score: ScoreView,
}

impl App {
    pub fn new(config: &Config, palette: Palette) -> Self {
        let mut game = Game::new(config.tolerance_ms);
        game.subscribe(Box::new(LogObserver));

        Self {
            round: game.round_view(),
            score: game.score_view(),
            game,
            palette,
        }
    }

    /// Forward a key press to the game and refresh only the views it touched
    pub fn on_key(&mut self, key: KeyEvent, at_ms: u64) -> Changes {
        let KeyCode::Char(c) = key.code else {
            return Changes::default();
        };
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Changes::default();
        }

        let changes = self.game.handle_key(c, at_ms);
        if changes.round {
            self.round = self.game.round_view();
        }
        if changes.score {
            self.score = self.game.score_view();
        }
        changes
    }
}

/// Raw mode plus alternate screen. Dropping it puts the terminal back, so an
/// early `?` during setup or a failed draw still leaves a usable shell.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        // each step runs even if an earlier one failed
        if let Err(err) = disable_raw_mode() {
            warn!("could not leave raw mode: {err}");
        }
        if let Err(err) = execute!(self.out, LeaveAlternateScreen, Show) {
            warn!("could not restore the screen: {err}");
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err).exit();
    }
    if cli.save_config {
        store.save(&config)?;
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // the game is still playable without a log file
        if let Err(err) = init_file_logger(&path, cli.log_level.as_filter()) {
            eprintln!("logging disabled ({}): {err}", path.display());
        }
    }
    info!("starting with {config:?} (config file {})", store.path().display());
    if cli.save_config {
        info!("saved settings to {}", store.path().display());
    }

    let palette = config.palette()?;

    let mut app = App::new(&config, palette);
    let result = {
        let _guard = TerminalGuard::enter(io::stdout())?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        start_tui(&mut terminal, &mut app, &config)
    };

    info!("final score {}", app.score);
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new(MonotonicClock::new());
    let ticker = FixedTicker::new(Duration::from_millis(config.tick_rate_ms));
    let runner = Runner::new(events, ticker);

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {}
            GameEvent::Closed => {
                warn!("terminal events stopped, leaving");
                break;
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key { key, at_ms } => {
                if is_quit(&key) {
                    break;
                }
                if app.on_key(key, at_ms).any() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_duel::{view::Border, Choice, Outcome};

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(&Config::default(), Palette::default())
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["rps-duel"]);

        assert_eq!(cli.tolerance_ms, None);
        assert_eq!(cli.tick_rate_ms, None);
        assert_eq!(cli.config, None);
        assert!(!cli.save_config);
        assert!(matches!(cli.log_level, LogLevel::Info));
    }

    #[test]
    fn test_cli_tolerance() {
        let cli = Cli::parse_from(["rps-duel", "-t", "150"]);
        assert_eq!(cli.tolerance_ms, Some(150));

        let cli = Cli::parse_from(["rps-duel", "--tolerance-ms", "500"]);
        assert_eq!(cli.tolerance_ms, Some(500));
    }

    #[test]
    fn test_cli_log_options() {
        let cli = Cli::parse_from([
            "rps-duel",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/rps.log",
        ]);
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.log_level.as_filter(), LevelFilter::Debug);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/rps.log")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["rps-duel", "-t", "120", "--tick-rate-ms", "20"]);
        let config = cli.apply(Config {
            tolerance_ms: 999,
            ..Config::default()
        });
        assert_eq!(config.tolerance_ms, 120);
        assert_eq!(config.tick_rate_ms, 20);

        let cli = Cli::parse_from(["rps-duel"]);
        let config = cli.apply(Config {
            tolerance_ms: 999,
            ..Config::default()
        });
        assert_eq!(config.tolerance_ms, 999);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "Warn");
    }

    #[test]
    fn test_app_updates_views_on_round() {
        let mut app = test_app();
        assert_eq!(app.round.p1, None);

        let changes = app.on_key(press('d'), 0);
        assert_eq!(changes, Changes { round: true, score: false });
        assert_eq!(app.round.p1.unwrap().choice, Choice::Scissors);

        let changes = app.on_key(press('5'), 200);
        assert!(changes.score);
        assert_eq!(app.score, ScoreView { p1: 1, p2: 0 });
        assert_eq!(app.round.p1.unwrap().border, Border::Highlight);
        assert_eq!(app.game.last_outcome(), Outcome::P1Wins);
    }

    #[test]
    fn test_app_ignores_modified_and_non_char_keys() {
        let mut app = test_app();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!app.on_key(ctrl_a, 0).any());
        assert!(!app
            .on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), 0)
            .any());
        assert!(!app.on_key(press('q'), 0).any());
        assert_eq!(app.round, app.game.round_view());
    }

    #[test]
    fn test_shift_still_counts() {
        let mut app = test_app();
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(app.on_key(shifted, 0).round);
        assert_eq!(app.round.p1.unwrap().choice, Choice::Rock);
    }

    #[test]
    fn test_terminal_guard_restores_screen_on_drop() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "alternate screen left");
        assert!(written.contains("\x1b[?25h"), "cursor shown");
    }

    #[test]
    fn test_terminal_guard_restores_when_setup_bails_early() {
        fn setup(out: &mut Vec<u8>) -> io::Result<()> {
            let _guard = TerminalGuard { out };
            Err(io::Error::new(io::ErrorKind::Other, "no terminal"))
        }

        let mut out = Vec::new();
        assert!(setup(&mut out).is_err());
        assert!(String::from_utf8(out).unwrap().contains("\x1b[?1049l"));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&press('c')));
    }
}
