use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::SeedableRng;

use padwork::config::Config;
use padwork::controller::SessionController;
use padwork::cue::{CueKind, Sound};
use padwork::judge::InputVerdict;
use padwork::observer::{Feedback, RecordingObserver, Signal};
use padwork::session::EndCause;

fn started(config: Config) -> SessionController<RecordingObserver> {
    let mut engine =
        SessionController::new(config, RecordingObserver::new(), StdRng::seed_from_u64(19));
    engine.start_round();
    engine
}

fn no_cues() -> Config {
    Config {
        first_cue_delay: 10.0,
        ..Config::default()
    }
}

fn tick_until_cue(engine: &mut SessionController<RecordingObserver>) -> CueKind {
    for _ in 0..1000 {
        if let Some(cue) = engine.pending_cue() {
            return cue.kind;
        }
        engine.tick(0.01);
    }
    panic!("no cue issued");
}

fn other_than(kind: CueKind) -> CueKind {
    CueKind::ALL.into_iter().find(|k| *k != kind).unwrap()
}

#[test]
fn five_stray_presses_knock_the_player_out() {
    let mut engine = started(no_cues());

    for expected in (0..5).rev() {
        engine.tick(0.2);
        assert_eq!(engine.submit_action(CueKind::Jab), InputVerdict::Ignored);
        assert_eq!(engine.state().health, expected);
    }

    assert!(!engine.state().active);
    assert_eq!(engine.state().end_cause, Some(EndCause::Defeated));
    let rec = engine.observer();
    assert_eq!(rec.feedbacks().last(), Some(&Feedback::GameOver));
    assert_eq!(rec.count(|s| matches!(s, Signal::Sound(Sound::HeartLoss))), 5);
    assert_eq!(rec.summaries().len(), 1);
    assert_eq!(rec.summaries()[0].tally.wrong_key, 5);
}

#[test]
fn restart_after_game_over_restores_a_fresh_round() {
    let mut engine = started(no_cues());
    for _ in 0..5 {
        engine.tick(0.2);
        engine.submit_action(CueKind::Block);
    }
    assert!(!engine.state().active);

    // presses after the round are dropped
    assert_eq!(engine.submit_action(CueKind::Block), InputVerdict::Ignored);
    assert_eq!(engine.state().tally.wrong_key, 5);

    assert!(engine.restart());
    let state = engine.state();
    assert!(state.active);
    assert_eq!(state.health, 5);
    assert_eq!(state.score, 0);
    assert_eq!(state.streak, 0);
    assert_eq!(state.speed_multiplier, 1.0);
    assert_eq!(state.time_remaining, 90.0);
    assert_eq!(state.end_cause, None);
    assert_eq!(
        engine.observer().signals.iter().rev().take(2).collect::<Vec<_>>(),
        vec![&Signal::Health(5), &Signal::FeedbackCleared]
    );
}

#[test]
fn restart_is_refused_mid_round() {
    let mut engine = started(Config::default());
    engine.tick(0.5);
    assert!(!engine.restart());
    assert!(engine.state().elapsed > 0.0);
}

#[test]
fn stray_presses_inside_the_cooldown_cost_one_heart() {
    let mut engine = started(no_cues());
    engine.tick(0.2);
    engine.submit_action(CueKind::Jab);
    engine.tick(0.05);
    engine.submit_action(CueKind::Jab);
    engine.submit_action(CueKind::Hook);
    assert_eq!(engine.state().health, 4);

    engine.tick(0.06);
    engine.submit_action(CueKind::Jab);
    assert_eq!(engine.state().health, 3);
}

#[test]
fn wrong_key_on_a_cue_costs_a_heart_and_the_streak() {
    let mut engine = started(Config::default());
    let kind = tick_until_cue(&mut engine);
    engine.tick(0.3);
    engine.submit_action(kind);
    assert_eq!(engine.state().streak, 1);

    let kind = tick_until_cue(&mut engine);
    assert_eq!(engine.submit_action(other_than(kind)), InputVerdict::Rejected);
    assert_eq!(engine.state().streak, 0);
    assert_eq!(engine.state().max_streak, 1);
    assert_eq!(engine.state().health, 4);
    assert!(engine.pending_cue().is_none());
    assert_eq!(engine.observer().feedbacks().last(), Some(&Feedback::WrongKey));
}

#[test]
fn press_in_the_timeout_tick_is_not_a_second_penalty() {
    let mut engine = started(Config::default());
    tick_until_cue(&mut engine);
    let deadline = engine.pending_cue().unwrap().deadline();
    engine.tick(deadline - engine.now());
    assert!(engine.pending_cue().is_none());
    assert_eq!(engine.state().health, 4);

    assert_eq!(engine.submit_action(CueKind::Jab), InputVerdict::Ignored);
    assert_eq!(engine.state().health, 4);
}

#[test]
fn round_end_abandons_the_pending_cue() {
    let config = Config {
        round_duration: 0.5,
        ..Config::default()
    };
    let mut engine = started(config);
    tick_until_cue(&mut engine);
    engine.tick(0.3);

    assert!(!engine.state().active);
    assert_eq!(engine.state().end_cause, Some(EndCause::TimeUp));
    assert_eq!(engine.state().health, 5);
    assert!(engine.pending_cue().is_none());
    assert_matches!(engine.submit_action(CueKind::Jab), InputVerdict::Ignored);
}
