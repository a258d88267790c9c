use crate::cue::{CueKind, Sound};
use crate::session::RoundSummary;

/// Short text feedback shown after a judgment or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Feedback {
    Perfect,
    Good,
    Late,
    Miss,
    #[strum(serialize = "Wrong Key!")]
    WrongKey,
    #[strum(serialize = "Speed Up!")]
    SpeedUp,
    #[strum(serialize = "Game Over")]
    GameOver,
}

/// Outward boundary of the engine: prompts, feedback, audio, hearts and the
/// end-of-round summary. Every method defaults to doing nothing so a
/// front end only implements what it renders.
pub trait RoundObserver {
    fn present_cue(&mut self, _kind: CueKind, _key_label: &str) {}
    fn cue_cleared(&mut self, _kind: CueKind) {}
    fn feedback(&mut self, _feedback: Feedback) {}
    fn clear_feedback(&mut self) {}
    fn play_sound(&mut self, _sound: Sound) {}
    fn health_changed(&mut self, _health: u32) {}
    fn round_summary(&mut self, _summary: &RoundSummary) {}
}

/// Observer that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RoundObserver for NullObserver {}

/// One boundary call, as captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    CuePresented(CueKind, String),
    CueCleared(CueKind),
    Feedback(Feedback),
    FeedbackCleared,
    Sound(Sound),
    Health(u32),
    Summary(RoundSummary),
}

/// Observer that keeps every call, for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub signals: Vec<Signal>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.signals.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Signal) -> bool) -> usize {
        self.signals.iter().filter(|s| predicate(s)).count()
    }

    pub fn feedbacks(&self) -> Vec<Feedback> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::Feedback(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<&RoundSummary> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::Summary(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    pub fn last_presented(&self) -> Option<CueKind> {
        self.signals.iter().rev().find_map(|s| match s {
            Signal::CuePresented(kind, _) => Some(*kind),
            _ => None,
        })
    }
}

impl RoundObserver for RecordingObserver {
    fn present_cue(&mut self, kind: CueKind, key_label: &str) {
        self.signals
            .push(Signal::CuePresented(kind, key_label.to_string()));
    }

    fn cue_cleared(&mut self, kind: CueKind) {
        self.signals.push(Signal::CueCleared(kind));
    }

    fn feedback(&mut self, feedback: Feedback) {
        self.signals.push(Signal::Feedback(feedback));
    }

    fn clear_feedback(&mut self) {
        self.signals.push(Signal::FeedbackCleared);
    }

    fn play_sound(&mut self, sound: Sound) {
        self.signals.push(Signal::Sound(sound));
    }

    fn health_changed(&mut self, health: u32) {
        self.signals.push(Signal::Health(health));
    }

    fn round_summary(&mut self, summary: &RoundSummary) {
        self.signals.push(Signal::Summary(summary.clone()));
    }
}

impl From<crate::judge::PrecisionTier> for Feedback {
    fn from(tier: crate::judge::PrecisionTier) -> Self {
        use crate::judge::PrecisionTier;
        match tier {
            PrecisionTier::Perfect => Feedback::Perfect,
            PrecisionTier::Good => Feedback::Good,
            PrecisionTier::Late => Feedback::Late,
            PrecisionTier::Miss => Feedback::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::PrecisionTier;

    #[test]
    fn feedback_text() {
        assert_eq!(Feedback::Perfect.to_string(), "Perfect");
        assert_eq!(Feedback::WrongKey.to_string(), "Wrong Key!");
        assert_eq!(Feedback::SpeedUp.to_string(), "Speed Up!");
        assert_eq!(Feedback::GameOver.to_string(), "Game Over");
    }

    #[test]
    fn tiers_map_to_feedback() {
        assert_eq!(Feedback::from(PrecisionTier::Good), Feedback::Good);
        assert_eq!(Feedback::from(PrecisionTier::Miss), Feedback::Miss);
    }

    #[test]
    fn recording_observer_keeps_order() {
        let mut rec = RecordingObserver::new();
        rec.present_cue(CueKind::Hook, "L");
        rec.play_sound(Sound::HeavyPunch);
        rec.feedback(Feedback::Good);
        rec.health_changed(4);

        assert_eq!(
            rec.signals,
            vec![
                Signal::CuePresented(CueKind::Hook, "L".to_string()),
                Signal::Sound(Sound::HeavyPunch),
                Signal::Feedback(Feedback::Good),
                Signal::Health(4),
            ]
        );
        assert_eq!(rec.last_presented(), Some(CueKind::Hook));
        assert_eq!(rec.feedbacks(), vec![Feedback::Good]);
        assert_eq!(rec.sounds(), vec![Sound::HeavyPunch]);
        assert_eq!(rec.count(|s| matches!(s, Signal::Health(_))), 1);

        rec.clear();
        assert!(rec.signals.is_empty());
    }

    #[test]
    fn null_observer_accepts_everything() {
        let mut null = NullObserver;
        null.present_cue(CueKind::Jab, "J");
        null.clear_feedback();
    }
}
