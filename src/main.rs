mod ui;

use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use tracing::{info, warn};

use padwork::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::SessionController,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, FrameClock, PadEvent, Runner},
};

use crate::ui::hud::Hud;

const TICK_RATE_MS: u64 = 16;

/// reflex pad-work trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Throw the punch the screen calls for before the cue fades. Clean hits build your streak and speed the round up; misses and wrong keys cost hearts."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 's', long)]
    round_secs: Option<f64>,

    /// number of hearts per round
    #[clap(short = 'H', long)]
    hearts: Option<u32>,

    /// settings file to use instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the settings file
    #[clap(long)]
    save_config: bool,

    /// log engine events at debug level
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command-line values win over whatever the settings file says.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.round_secs {
            config.round_duration = secs;
        }
        if let Some(hearts) = self.hearts {
            config.max_health = hearts;
        }
        config
    }
}

#[derive(Debug)]
pub struct App {
    pub engine: SessionController<Hud>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::from_controller(SessionController::with_entropy(config, Hud::new()))
    }

    pub fn from_controller(engine: SessionController<Hud>) -> Self {
        Self { engine }
    }

    pub fn is_playing(&self) -> bool {
        self.engine.state().active
    }

    pub fn advance(&mut self, dt: f64) {
        self.engine.tick(dt);
        self.engine.observer_mut().advance(dt);
    }

    pub fn restart(&mut self) -> bool {
        self.engine.restart()
    }

    /// Applies one loop event. Returns false when the player asked to quit.
    pub fn on_event(&mut self, event: PadEvent) -> bool {
        match event {
            PadEvent::Quit => return false,
            PadEvent::Restart => {
                self.restart();
            }
            PadEvent::Action(action) => {
                self.engine.submit_action(action);
            }
            PadEvent::Resize | PadEvent::Tick => {}
        }
        true
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(AppDirs::log_path().as_deref(), cli.verbose) {
        eprintln!("padwork: logging disabled: {err}");
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err).exit();
    }
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "settings saved");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(%err, "terminal loop failed");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut clock = FrameClock::new();

    app.engine.start_round();

    loop {
        terminal.draw(|f| ui(app, f))?;

        let event = runner.step();
        // input is judged against the clock as of the key press
        app.advance(clock.lap());

        if !app.on_event(event) {
            break;
        }
    }

    let state = app.engine.state();
    info!(score = state.score, max_streak = state.max_streak, "quit");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
