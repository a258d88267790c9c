use crate::config::Config;
use crate::difficulty::DifficultyController;
use crate::judge::PrecisionTier;
use crate::util::{mean, std_dev};

/// Why a round stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EndCause {
    #[strum(serialize = "Time up")]
    TimeUp,
    #[strum(serialize = "Knocked out")]
    Defeated,
}

/// Per-tier counts for a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierTally {
    pub perfect: u32,
    pub good: u32,
    pub late: u32,
    pub missed: u32,
    pub wrong_key: u32,
}

/// What the boundary receives when a round ends.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub final_score: u32,
    pub max_streak: u32,
    pub seconds_survived: f64,
    pub cause: EndCause,
    pub tally: TierTally,
    pub top_speed: f64,
    pub mean_offset: Option<f64>,
    pub offset_std_dev: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    /// Streak just reached a multiple of the milestone step.
    pub milestone: bool,
    /// New multiplier if this hit triggered a speed-up.
    pub speed_up: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Round inactive or health already gone.
    Ignored,
    Hurt { remaining: u32 },
    Defeated,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub health: u32,
    pub max_health: u32,
    pub successful_hits: u32,
    pub speed_multiplier: f64,
    pub round_duration: f64,
    pub time_remaining: f64,
    pub elapsed: f64,
    pub active: bool,
    pub end_cause: Option<EndCause>,
    pub tally: TierTally,
    pub offsets: Vec<f64>,
    streak_milestone: u32,
}

impl SessionState {
    /// A fresh, inactive session. Call [`SessionState::start_round`] to play.
    pub fn new(config: &Config) -> Self {
        Self {
            score: 0,
            streak: 0,
            max_streak: 0,
            health: config.max_health,
            max_health: config.max_health,
            successful_hits: 0,
            speed_multiplier: 1.0,
            round_duration: config.round_duration,
            time_remaining: config.round_duration,
            elapsed: 0.0,
            active: false,
            end_cause: None,
            tally: TierTally::default(),
            offsets: Vec::new(),
            streak_milestone: config.streak_milestone.max(1),
        }
    }

    pub fn start_round(&mut self) {
        self.active = true;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.successful_hits = 0;
        self.health = self.max_health;
        self.speed_multiplier = 1.0;
        self.time_remaining = self.round_duration;
        self.elapsed = 0.0;
        self.end_cause = None;
        self.tally = TierTally::default();
        self.offsets.clear();
    }

    /// Runs the round clock. Returns true when time just ran out.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.round_duration);
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        self.time_remaining <= 0.0
    }

    pub fn add_score(&mut self, points: u32, difficulty: &mut DifficultyController) -> ScoreOutcome {
        self.score = self.score.saturating_add(points);
        self.streak += 1;
        self.successful_hits += 1;
        self.max_streak = self.max_streak.max(self.streak);

        let milestone = self.streak % self.streak_milestone == 0;
        let speed_up = difficulty.evaluate(self.successful_hits, &mut self.speed_multiplier);
        ScoreOutcome {
            milestone,
            speed_up,
        }
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.health == 0 || !self.active {
            return DamageOutcome::Ignored;
        }
        self.health -= 1;
        if self.health == 0 {
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Hurt {
                remaining: self.health,
            }
        }
    }

    /// Freezes the round. Returns false if it was already over.
    pub fn end(&mut self, cause: EndCause) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.end_cause = Some(cause);
        true
    }

    pub fn record_judgment(&mut self, tier: PrecisionTier, offset: f64) {
        match tier {
            PrecisionTier::Perfect => self.tally.perfect += 1,
            PrecisionTier::Good => self.tally.good += 1,
            PrecisionTier::Late => self.tally.late += 1,
            PrecisionTier::Miss => self.tally.missed += 1,
        }
        self.offsets.push(offset);
    }

    pub fn record_timeout(&mut self) {
        self.tally.missed += 1;
    }

    pub fn record_wrong_key(&mut self) {
        self.tally.wrong_key += 1;
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            final_score: self.score,
            max_streak: self.max_streak,
            seconds_survived: self.elapsed,
            cause: self.end_cause.unwrap_or(EndCause::TimeUp),
            tally: self.tally,
            top_speed: self.speed_multiplier,
            mean_offset: mean(&self.offsets),
            offset_std_dev: std_dev(&self.offsets),
        }
    }
}
