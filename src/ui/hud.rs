use padwork::cue::{CueKind, Sound};
use padwork::observer::{Feedback, RoundObserver};
use padwork::session::RoundSummary;

/// How long a feedback word stays up before it fades on its own.
pub const FEEDBACK_SECS: f64 = 1.0;

/// What the screen currently shows, fed by the engine's observer calls.
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub cue: Option<(CueKind, String)>,
    pub feedback: Option<Feedback>,
    feedback_left: f64,
    pub health: u32,
    pub last_sound: Option<Sound>,
    pub summary: Option<RoundSummary>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count down the feedback display; clears it once expired.
    pub fn advance(&mut self, dt: f64) {
        if self.feedback.is_none() {
            return;
        }
        self.feedback_left -= dt;
        if self.feedback_left <= 0.0 {
            self.feedback = None;
            self.feedback_left = 0.0;
        }
    }
}

impl RoundObserver for Hud {
    fn present_cue(&mut self, kind: CueKind, key_label: &str) {
        self.cue = Some((kind, key_label.to_string()));
    }

    fn cue_cleared(&mut self, _kind: CueKind) {
        self.cue = None;
    }

    fn feedback(&mut self, feedback: Feedback) {
        // game over sticks until the next round
        self.feedback = Some(feedback);
        self.feedback_left = if feedback == Feedback::GameOver {
            f64::INFINITY
        } else {
            FEEDBACK_SECS
        };
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
        self.feedback_left = 0.0;
    }

    fn play_sound(&mut self, sound: Sound) {
        tracing::trace!(%sound, "sound");
        self.last_sound = Some(sound);
    }

    fn health_changed(&mut self, health: u32) {
        self.health = health;
        if health > 0 {
            self.summary = None;
        }
    }

    fn round_summary(&mut self, summary: &RoundSummary) {
        self.cue = None;
        self.summary = Some(summary.clone());
    }
}
