use crate::config::Config;
use crate::cue::{CueKind, PendingCue};
use crate::scheduler::CueScheduler;

/// How close to the cue midpoint a correct key landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PrecisionTier {
    Perfect,
    Good,
    Late,
    Miss,
}

/// What the caller of [`InputJudge::check_input`] sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVerdict {
    /// Right key for the pending cue.
    Accepted,
    /// Wrong key for the pending cue.
    Rejected,
    /// Nothing to judge.
    Ignored,
}

/// Full result of judging one action, for the controller to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Judgment {
    Ignored,
    Matched {
        cue: PendingCue,
        tier: PrecisionTier,
        offset: f64,
        points: u32,
    },
    WrongKey {
        cue: PendingCue,
        pressed: CueKind,
    },
}

impl Judgment {
    pub fn verdict(&self) -> InputVerdict {
        match self {
            Judgment::Ignored => InputVerdict::Ignored,
            Judgment::Matched { .. } => InputVerdict::Accepted,
            Judgment::WrongKey { .. } => InputVerdict::Rejected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputJudge {
    perfect_window: f64,
    good_window: f64,
    late_window: f64,
    perfect_score: u32,
    good_score: u32,
    late_score: u32,
}

impl InputJudge {
    pub fn new(config: &Config) -> Self {
        Self {
            perfect_window: config.perfect_window,
            good_window: config.good_window,
            late_window: config.late_window,
            perfect_score: config.perfect_score,
            good_score: config.good_score,
            late_score: config.late_score,
        }
    }

    /// Tier for a signed timing offset, in seconds.
    pub fn classify(&self, offset: f64) -> PrecisionTier {
        let abs = offset.abs();
        if abs <= self.perfect_window {
            PrecisionTier::Perfect
        } else if abs <= self.good_window {
            PrecisionTier::Good
        } else if abs <= self.late_window {
            PrecisionTier::Late
        } else {
            PrecisionTier::Miss
        }
    }

    pub fn points(&self, tier: PrecisionTier) -> u32 {
        match tier {
            PrecisionTier::Perfect => self.perfect_score,
            PrecisionTier::Good => self.good_score,
            PrecisionTier::Late => self.late_score,
            PrecisionTier::Miss => 0,
        }
    }

    /// Judges `action` against whatever cue `scheduler` has pending.
    ///
    /// A judged cue is resolved and taken out of the scheduler, which also
    /// drops its timeout deadline.
    pub fn check_input(&self, action: CueKind, scheduler: &mut CueScheduler, now: f64) -> Judgment {
        let Some(cue) = scheduler.resolve() else {
            return Judgment::Ignored;
        };

        if action != cue.expected_action() {
            return Judgment::WrongKey {
                cue,
                pressed: action,
            };
        }

        let offset = cue.timing_offset(now);
        let tier = self.classify(offset);
        Judgment::Matched {
            cue,
            tier,
            offset,
            points: self.points(tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyController;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn judge() -> InputJudge {
        InputJudge::new(&Config::default())
    }

    fn scheduler_with_cue() -> (CueScheduler, PendingCue) {
        let cfg = Config::default();
        let difficulty = DifficultyController::new(&cfg);
        let mut scheduler = CueScheduler::new(&cfg, StdRng::seed_from_u64(7));
        scheduler.arm(0.0);
        let cue = scheduler
            .issue_due(0.3, &difficulty.parameters(1.0))
            .expect("cue due");
        (scheduler, cue)
    }

    #[test]
    fn classify_tiers() {
        let j = judge();
        assert_eq!(j.classify(0.0), PrecisionTier::Perfect);
        assert_eq!(j.classify(-0.1), PrecisionTier::Perfect);
        assert_eq!(j.classify(0.2), PrecisionTier::Good);
        assert_eq!(j.classify(-0.25), PrecisionTier::Good);
        assert_eq!(j.classify(0.4), PrecisionTier::Late);
        assert_eq!(j.classify(0.5), PrecisionTier::Late);
        assert_eq!(j.classify(0.51), PrecisionTier::Miss);
        assert_eq!(j.classify(-2.0), PrecisionTier::Miss);
    }

    #[test]
    fn points_per_tier() {
        let j = judge();
        assert_eq!(j.points(PrecisionTier::Perfect), 100);
        assert_eq!(j.points(PrecisionTier::Good), 50);
        assert_eq!(j.points(PrecisionTier::Late), 10);
        assert_eq!(j.points(PrecisionTier::Miss), 0);
    }

    #[test]
    fn nothing_pending_is_ignored() {
        let cfg = Config::default();
        let mut scheduler = CueScheduler::new(&cfg, StdRng::seed_from_u64(1));
        let judgment = judge().check_input(CueKind::Jab, &mut scheduler, 1.0);
        assert_eq!(judgment, Judgment::Ignored);
        assert_eq!(judgment.verdict(), InputVerdict::Ignored);
    }

    #[test]
    fn matching_key_at_midpoint_is_perfect() {
        let (mut scheduler, cue) = scheduler_with_cue();
        let judgment = judge().check_input(cue.kind, &mut scheduler, cue.midpoint());
        assert_matches!(
            judgment,
            Judgment::Matched {
                tier: PrecisionTier::Perfect,
                points: 100,
                ..
            }
        );
        assert_eq!(judgment.verdict(), InputVerdict::Accepted);
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn offset_is_measured_from_the_midpoint() {
        let (mut scheduler, cue) = scheduler_with_cue();
        // pressed right as the cue appeared: half the display time early
        let judgment = judge().check_input(cue.kind, &mut scheduler, cue.issued_at);
        match judgment {
            Judgment::Matched { offset, tier, .. } => {
                assert!((offset + cue.display_duration / 2.0).abs() < 1e-12);
                assert_eq!(tier, PrecisionTier::Late);
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn wrong_key_is_rejected_and_resolves_the_cue() {
        let (mut scheduler, cue) = scheduler_with_cue();
        let wrong = CueKind::ALL
            .into_iter()
            .find(|k| *k != cue.kind)
            .unwrap();
        let judgment = judge().check_input(wrong, &mut scheduler, cue.midpoint());
        assert_matches!(judgment, Judgment::WrongKey { pressed, .. } if pressed == wrong);
        assert_eq!(judgment.verdict(), InputVerdict::Rejected);
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn a_cue_is_judged_only_once() {
        let (mut scheduler, cue) = scheduler_with_cue();
        let j = judge();
        assert_ne!(j.check_input(cue.kind, &mut scheduler, cue.midpoint()), Judgment::Ignored);
        assert_eq!(j.check_input(cue.kind, &mut scheduler, cue.midpoint()), Judgment::Ignored);
    }
}
