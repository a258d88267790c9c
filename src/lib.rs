// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod cue;
pub mod difficulty;
pub mod judge;
pub mod logging;
pub mod observer;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod util;

pub use config::{Config, ConfigError, ConfigStore, FileConfigStore};
pub use controller::SessionController;
pub use cue::{CueKind, PendingCue, Sound};
pub use observer::{Feedback, RoundObserver};
pub use session::{EndCause, RoundSummary};
