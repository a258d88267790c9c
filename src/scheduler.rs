use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::cue::{CueKind, PendingCue};
use crate::difficulty::DifficultyParameters;

/// Tolerance for comparing accumulated tick times against deadlines.
pub const CLOCK_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Round not running; nothing will be issued until re-armed.
    Halted,
    /// Waiting out the gap before the next cue.
    Idle,
    CueIssued,
}

/// Owns the single pending cue and the instants at which cues expire and
/// new ones appear. All waiting is expressed as deadlines on the engine
/// clock; the controller polls them once per tick.
#[derive(Debug)]
pub struct CueScheduler {
    rng: StdRng,
    pending: Option<PendingCue>,
    next_issue_at: Option<f64>,
    first_cue_delay: f64,
}

impl CueScheduler {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        Self {
            rng,
            pending: None,
            next_issue_at: None,
            first_cue_delay: config.first_cue_delay,
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        match (&self.pending, self.next_issue_at) {
            (Some(_), _) => SchedulerPhase::CueIssued,
            (None, Some(_)) => SchedulerPhase::Idle,
            (None, None) => SchedulerPhase::Halted,
        }
    }

    pub fn pending(&self) -> Option<&PendingCue> {
        self.pending.as_ref()
    }

    pub fn next_issue_at(&self) -> Option<f64> {
        self.next_issue_at
    }

    /// Starts a fresh cycle; the first cue comes after the start delay.
    pub fn arm(&mut self, now: f64) {
        self.pending = None;
        self.next_issue_at = Some(now + self.first_cue_delay);
    }

    /// Stops the cycle and drops any pending cue without judging it.
    pub fn halt(&mut self) -> Option<PendingCue> {
        self.next_issue_at = None;
        self.pending.take()
    }

    /// Takes the pending cue out for judgment. Its timeout goes with it.
    pub fn resolve(&mut self) -> Option<PendingCue> {
        let mut cue = self.pending.take().filter(|cue| !cue.resolved)?;
        cue.resolved = true;
        Some(cue)
    }

    /// Removes and returns the pending cue if its deadline has passed.
    pub fn expire_due(&mut self, now: f64) -> Option<PendingCue> {
        let deadline = self.pending.as_ref()?.deadline();
        if now + CLOCK_EPSILON < deadline {
            return None;
        }
        self.resolve()
    }

    /// Issues a new cue if none is pending and the gap has elapsed.
    pub fn issue_due(&mut self, now: f64, params: &DifficultyParameters) -> Option<PendingCue> {
        if self.pending.is_some() {
            return None;
        }
        let due = self.next_issue_at?;
        if now + CLOCK_EPSILON < due {
            return None;
        }

        let kind = *CueKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&CueKind::Jab);
        let cue = PendingCue::new(kind, now, params.cue_display_time, params.timing_window);

        let low = params.cue_cooldown * 0.2;
        let high = params.cue_cooldown * 0.8;
        let gap = if high > low {
            self.rng.gen_range(low..=high)
        } else {
            low
        };
        self.next_issue_at = Some(now + params.cue_display_time + gap);
        self.pending = Some(cue);
        Some(cue)
    }
}
