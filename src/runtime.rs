use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::cue::CueKind;

/// What the front end loop reacts to, already translated from raw keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadEvent {
    Action(CueKind),
    Restart,
    Quit,
    Resize,
    Tick,
}

impl PadEvent {
    /// Maps a key press onto the pad. Keys with no meaning give `None`.
    pub fn from_key(key: KeyEvent) -> Option<PadEvent> {
        match key.code {
            KeyCode::Esc => Some(PadEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(PadEvent::Quit)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(PadEvent::Restart),
            KeyCode::Char(c) => CueKind::from_key(c).map(PadEvent::Action),
            _ => None,
        }
    }
}

/// Anything that can hand the loop its next event within a deadline.
pub trait PadEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<PadEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<PadEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let translated = match event::read() {
                // release/repeat would count as extra punches
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => PadEvent::from_key(key),
                Ok(CtEvent::Resize(_, _)) => Some(PadEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(%err, "terminal input closed");
                    break;
                }
            };
            if let Some(ev) = translated {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PadEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PadEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for headless runs.
pub struct TestEventSource {
    rx: Receiver<PadEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PadEvent>) -> Self {
        Self { rx }
    }
}

impl PadEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PadEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Pulls one event per call, falling back to `Tick` so the engine clock
/// keeps moving while the player is idle.
pub struct Runner<E: PadEventSource, T: Ticker> {
    source: E,
    ticker: T,
}

impl<E: PadEventSource, T: Ticker> Runner<E, T> {
    pub fn new(source: E, ticker: T) -> Self {
        Self { source, ticker }
    }

    pub fn step(&self) -> PadEvent {
        self.source
            .recv_timeout(self.ticker.interval())
            .unwrap_or(PadEvent::Tick)
    }
}

/// Wall-clock stopwatch turning real time into engine tick deltas.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call (or construction).
    pub fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
