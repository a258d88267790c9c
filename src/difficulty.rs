use crate::config::Config;

/// Timing values derived from the live speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParameters {
    pub cue_display_time: f64,
    pub timing_window: f64,
    pub cue_cooldown: f64,
}

/// Turns a run of successful hits into a faster round.
///
/// The multiplier itself lives in [`crate::session::SessionState`]; this type
/// only knows the escalation rule and the floors that keep the derived
/// durations playable.
#[derive(Debug, Clone)]
pub struct DifficultyController {
    hits_for_speed_increase: u32,
    speed_growth_factor: f64,
    max_speed_multiplier: f64,
    base_cue_display_time: f64,
    min_cue_display_time: f64,
    base_timing_window: f64,
    min_timing_window: f64,
    base_cue_cooldown: f64,
    min_cue_cooldown: f64,
    // successful_hits value that last triggered a speed-up
    last_escalation: Option<u32>,
}

impl DifficultyController {
    pub fn new(config: &Config) -> Self {
        Self {
            hits_for_speed_increase: config.hits_for_speed_increase.max(1),
            speed_growth_factor: config.speed_growth_factor,
            max_speed_multiplier: config.max_speed_multiplier,
            base_cue_display_time: config.base_cue_display_time,
            min_cue_display_time: config.min_cue_display_time,
            base_timing_window: config.base_timing_window,
            min_timing_window: config.min_timing_window,
            base_cue_cooldown: config.base_cue_cooldown,
            min_cue_cooldown: config.min_cue_cooldown,
            last_escalation: None,
        }
    }

    /// Forget past escalations. Called at round start.
    pub fn reset(&mut self) {
        self.last_escalation = None;
    }

    pub fn max_speed_multiplier(&self) -> f64 {
        self.max_speed_multiplier
    }

    /// Raises `speed` if `successful_hits` lands on a new multiple of the
    /// escalation step. Returns the new multiplier when it changed.
    ///
    /// Calling this twice for the same hit count applies at most once.
    pub fn evaluate(&mut self, successful_hits: u32, speed: &mut f64) -> Option<f64> {
        if successful_hits == 0 || successful_hits % self.hits_for_speed_increase != 0 {
            return None;
        }
        if self.last_escalation == Some(successful_hits) {
            return None;
        }
        if *speed >= self.max_speed_multiplier {
            return None;
        }

        self.last_escalation = Some(successful_hits);
        let raised = (*speed * self.speed_growth_factor).min(self.max_speed_multiplier);
        if raised <= *speed {
            return None;
        }
        *speed = raised;
        Some(raised)
    }

    pub fn parameters(&self, speed: f64) -> DifficultyParameters {
        let speed = speed.max(1.0);
        DifficultyParameters {
            cue_display_time: (self.base_cue_display_time / speed).max(self.min_cue_display_time),
            timing_window: (self.base_timing_window / speed).max(self.min_timing_window),
            cue_cooldown: (self.base_cue_cooldown / speed).max(self.min_cue_cooldown),
        }
    }
}
