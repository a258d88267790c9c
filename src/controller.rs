use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::cue::{CueKind, PendingCue, Sound};
use crate::difficulty::{DifficultyController, DifficultyParameters};
use crate::judge::{InputJudge, InputVerdict, Judgment, PrecisionTier};
use crate::observer::{Feedback, RoundObserver};
use crate::scheduler::{CueScheduler, CLOCK_EPSILON};
use crate::session::{DamageOutcome, EndCause, SessionState};

/// Top-level engine: owns the session, the difficulty rule, the judge and
/// the cue scheduler, and talks to the outside world through `O`.
///
/// Time only moves through [`SessionController::tick`]. Actions are judged
/// at the clock value of the latest tick.
#[derive(Debug)]
pub struct SessionController<O: RoundObserver> {
    config: Config,
    state: SessionState,
    difficulty: DifficultyController,
    judge: InputJudge,
    scheduler: CueScheduler,
    observer: O,
    now: f64,
    // shared by timeouts, wrong keys and unsolicited presses
    last_penalty_at: Option<f64>,
}

impl<O: RoundObserver> SessionController<O> {
    pub fn new(config: Config, observer: O, rng: StdRng) -> Self {
        Self {
            state: SessionState::new(&config),
            difficulty: DifficultyController::new(&config),
            judge: InputJudge::new(&config),
            scheduler: CueScheduler::new(&config, rng),
            observer,
            now: 0.0,
            last_penalty_at: None,
            config,
        }
    }

    /// Same as [`SessionController::new`] with an OS-seeded RNG.
    pub fn with_entropy(config: Config, observer: O) -> Self {
        Self::new(config, observer, StdRng::from_entropy())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_cue(&self) -> Option<&PendingCue> {
        self.scheduler.pending()
    }

    pub fn scheduler(&self) -> &CueScheduler {
        &self.scheduler
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn current_parameters(&self) -> DifficultyParameters {
        self.difficulty.parameters(self.state.speed_multiplier)
    }

    pub fn start_round(&mut self) {
        self.state.start_round();
        self.difficulty.reset();
        self.scheduler.arm(self.now);
        self.last_penalty_at = None;
        info!(
            round_duration = self.state.round_duration,
            max_health = self.state.max_health,
            "round started"
        );
        self.observer.health_changed(self.state.health);
    }

    /// Starts over after a round has ended. Refused while a round is running.
    pub fn restart(&mut self) -> bool {
        if self.state.active {
            debug!("restart refused: round still active");
            return false;
        }
        self.observer.clear_feedback();
        self.start_round();
        true
    }

    /// Round completed by the clock.
    pub fn end_round(&mut self) {
        self.finish(EndCause::TimeUp);
    }

    /// Round ended by losing all health.
    pub fn game_over(&mut self) {
        self.finish(EndCause::Defeated);
    }

    /// Advances the engine clock by `dt` seconds.
    ///
    /// Order within a tick: round clock, then cue timeout, then the next cue.
    pub fn tick(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.now += dt;
        if !self.state.active {
            return;
        }

        if self.state.tick(dt) {
            self.end_round();
            return;
        }

        if let Some(cue) = self.scheduler.expire_due(self.now) {
            self.on_timeout(cue);
            if !self.state.active {
                return;
            }
        }

        let params = self.current_parameters();
        if let Some(cue) = self.scheduler.issue_due(self.now, &params) {
            debug!(
                kind = %cue.kind,
                at = cue.issued_at,
                display = cue.display_duration,
                speed = self.state.speed_multiplier,
                "cue issued"
            );
            self.observer.present_cue(cue.kind, cue.kind.key_label());
        }
    }

    /// Feeds one player action into the engine.
    pub fn submit_action(&mut self, action: CueKind) -> InputVerdict {
        if !self.state.active {
            return InputVerdict::Ignored;
        }

        let judgment = self.judge.check_input(action, &mut self.scheduler, self.now);
        match judgment {
            Judgment::Ignored => self.on_unsolicited(action),
            Judgment::Matched {
                cue,
                tier,
                offset,
                points,
            } => self.on_match(cue, tier, offset, points),
            Judgment::WrongKey { cue, pressed } => self.on_wrong_key(cue, pressed),
        }
        judgment.verdict()
    }

    fn on_match(&mut self, cue: PendingCue, tier: PrecisionTier, offset: f64, points: u32) {
        debug!(kind = %cue.kind, %tier, offset, "cue judged");
        self.observer.cue_cleared(cue.kind);
        self.state.record_judgment(tier, offset);

        if tier == PrecisionTier::Miss {
            // right key, outside every window: streak only
            self.state.reset_streak();
            self.observer.feedback(Feedback::Miss);
            return;
        }

        self.observer.play_sound(cue.kind.punch_sound());
        let outcome = self.state.add_score(points, &mut self.difficulty);
        self.observer.feedback(tier.into());
        if outcome.milestone {
            self.observer.play_sound(Sound::StreakMilestone);
        }
        if let Some(speed) = outcome.speed_up {
            info!(speed, hits = self.state.successful_hits, "speed up");
            self.observer.feedback(Feedback::SpeedUp);
        }
    }

    fn on_wrong_key(&mut self, cue: PendingCue, pressed: CueKind) {
        debug!(expected = %cue.kind, %pressed, "wrong key");
        self.observer.cue_cleared(cue.kind);
        self.state.record_wrong_key();
        self.state.reset_streak();
        self.observer.feedback(Feedback::WrongKey);
        self.last_penalty_at = Some(self.now);
        self.apply_damage();
    }

    fn on_timeout(&mut self, cue: PendingCue) {
        debug!(kind = %cue.kind, at = self.now, "cue missed");
        self.observer.cue_cleared(cue.kind);
        self.state.record_timeout();
        self.state.reset_streak();
        self.observer.feedback(Feedback::Miss);
        self.observer.play_sound(Sound::Miss);
        self.last_penalty_at = Some(self.now);
        self.apply_damage();
    }

    fn on_unsolicited(&mut self, action: CueKind) {
        if !self.penalty_cooldown_elapsed() {
            debug!(%action, "unsolicited input inside penalty cooldown");
            return;
        }
        debug!(%action, "unsolicited input");
        self.state.record_wrong_key();
        self.observer.feedback(Feedback::WrongKey);
        self.last_penalty_at = Some(self.now);
        self.apply_damage();
    }

    fn penalty_cooldown_elapsed(&self) -> bool {
        let Some(last) = self.last_penalty_at else {
            return true;
        };
        let since = self.now - last;
        since > CLOCK_EPSILON && since + CLOCK_EPSILON >= self.config.unsolicited_input_cooldown
    }

    fn apply_damage(&mut self) {
        match self.state.take_damage() {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { remaining } => {
                self.observer.play_sound(Sound::HeartLoss);
                self.observer.health_changed(remaining);
            }
            DamageOutcome::Defeated => {
                self.observer.play_sound(Sound::HeartLoss);
                self.observer.health_changed(0);
                self.game_over();
            }
        }
    }

    fn finish(&mut self, cause: EndCause) {
        if !self.state.end(cause) {
            return;
        }
        if let Some(cue) = self.scheduler.halt() {
            debug!(kind = %cue.kind, "pending cue abandoned at round end");
        }
        if cause == EndCause::Defeated {
            self.observer.feedback(Feedback::GameOver);
        }

        let summary = self.state.summary();
        info!(
            %cause,
            score = summary.final_score,
            max_streak = summary.max_streak,
            seconds = summary.seconds_survived,
            "round over"
        );
        self.observer.round_summary(&summary);
    }
}
