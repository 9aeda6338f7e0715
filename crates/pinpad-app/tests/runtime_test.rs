//! End-to-end runtime tests on a paused clock.
//!
//! Each test scripts keypad taps at fixed offsets, runs the production
//! [`Runtime`] against the simulation driver, then checks the recording:
//! rendered snapshots, feedback commands with their offsets, and tones.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - The session outcome
//! - Feedback timing and shape
//! - What the screen showed last

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use pinpad_app::{Runtime, StaticVerifier};
use pinpad_core::{
    Digit, FeedbackCommand, KeypadKey, KeypadOrder, Notice, Phase, PinCode, RenderSnapshot,
    SessionConfig, SessionOutcome, Tone, VerifyOutcome,
};
use pinpad_harness::{
    InvariantRegistry, Recording, ScriptedTap, ScriptedVerifier, SimDriver, SimEnv,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Taps for `pin` every 10ms from `start_ms`, then confirm 10ms later.
fn pin_taps(keypad: &KeypadOrder, pin: &str, start_ms: u64) -> Vec<ScriptedTap> {
    let mut taps: Vec<_> = pin
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let position = keypad.position_of(Digit::from_char(c).unwrap()).unwrap();
            ScriptedTap::at_ms(start_ms + 10 * (i as u64 + 1), KeypadKey::Digit { position })
        })
        .collect();
    taps.push(ScriptedTap::at_ms(start_ms + 50, KeypadKey::Confirm));
    taps
}

fn driver(script: Vec<ScriptedTap>) -> SimDriver {
    SimDriver::new(script).with_invariants(InvariantRegistry::standard())
}

async fn run_canonical(
    script: Vec<ScriptedTap>,
    verifier: ScriptedVerifier,
) -> (SessionOutcome, Recording) {
    let driver = driver(script);
    let recording = driver.recording();
    let runtime = Runtime::with_keypad(
        driver,
        verifier,
        SimEnv::with_seed(0),
        KeypadOrder::canonical(),
        SessionConfig::default(),
    );

    let outcome = runtime.run().await.unwrap();
    let recording = recording.lock().unwrap().clone();
    (outcome, recording)
}

#[tokio::test(start_paused = true)]
async fn correct_pin_confirms_session() {
    let keypad = KeypadOrder::canonical();
    let verifier = ScriptedVerifier::new([VerifyOutcome::Accepted]).with_latency(ms(100));
    let requests = verifier.requests();

    let (outcome, recording) = run_canonical(pin_taps(&keypad, "1234", 0), verifier).await;

    assert_eq!(outcome, SessionOutcome::Confirmed);
    assert_eq!(*requests.lock().unwrap(), vec!["1234".parse::<PinCode>().unwrap()]);
    assert_eq!(recording.tones.iter().filter(|t| **t == Tone::KeyPress).count(), 5);
    assert_eq!(recording.tones.last(), Some(&Tone::Confirmed));
    assert!(recording.feedback.is_empty());
    assert!(recording.stopped);

    let last = recording.last_render().unwrap();
    assert_eq!(last.phase, Phase::Confirmed);
    assert_eq!(last.filled_dot_count, 0);
}

#[tokio::test(start_paused = true)]
async fn verifying_render_disables_confirm() {
    let keypad = KeypadOrder::canonical();
    let verifier = ScriptedVerifier::new([VerifyOutcome::Accepted]).with_latency(ms(100));

    let (_, recording) = run_canonical(pin_taps(&keypad, "5555", 0), verifier).await;

    let verifying = recording.renders.iter().find(|r| r.phase == Phase::Verifying).unwrap();
    assert!(!verifying.confirm_enabled);
    assert_eq!(verifying.filled_dot_count, 4);
}

#[tokio::test(start_paused = true)]
async fn rejection_plays_feedback_on_schedule() {
    let keypad = KeypadOrder::canonical();
    let mut script = pin_taps(&keypad, "0000", 0);
    script.push(ScriptedTap::at_ms(1_000, KeypadKey::Cancel));

    let (outcome, recording) =
        run_canonical(script, ScriptedVerifier::new([VerifyOutcome::Rejected])).await;

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert_eq!(recording.pulses(), vec![ms(50)]);
    assert_eq!(recording.displacements(), vec![
        (ms(50), 10),
        (ms(150), -10),
        (ms(250), 10),
        (ms(350), 0),
    ]);
    assert_eq!(recording.feedback.last(), Some(&(ms(350), FeedbackCommand::DotAlert(false))));

    let alerted = recording.renders.iter().find(|r| r.dot_alert_active).unwrap();
    assert_eq!(alerted.filled_dot_count, 0);
    assert_eq!(alerted.attempts_remaining, 2);
    assert_eq!(alerted.prompt_title, "Incorrect PIN");
    assert_eq!(alerted.prompt_subtitle, Some("Try again."));
}

#[tokio::test(start_paused = true)]
async fn taps_during_feedback_are_dropped() {
    let keypad = KeypadOrder::canonical();
    let mut script = pin_taps(&keypad, "0000", 0);
    script.extend([
        ScriptedTap::at_ms(100, KeypadKey::Digit { position: 0 }),
        ScriptedTap::at_ms(200, KeypadKey::Digit { position: 1 }),
        ScriptedTap::at_ms(400, KeypadKey::Digit { position: 2 }),
        ScriptedTap::at_ms(1_000, KeypadKey::Cancel),
    ]);

    let (_, recording) =
        run_canonical(script, ScriptedVerifier::new([VerifyOutcome::Rejected])).await;

    let before_cancel = &recording.renders[recording.renders.len() - 2];
    assert_eq!(before_cancel.filled_dot_count, 1);
    assert!(!before_cancel.dot_alert_active);
    assert_eq!(recording.tones.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_feedback_stops_actuation() {
    let keypad = KeypadOrder::canonical();
    let mut script = pin_taps(&keypad, "0000", 0);
    script.push(ScriptedTap::at_ms(120, KeypadKey::Cancel));

    let (outcome, recording) =
        run_canonical(script, ScriptedVerifier::new([VerifyOutcome::Rejected])).await;

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert!(recording.feedback.iter().all(|(at, _)| *at <= ms(120)));
    assert_eq!(recording.displacements().last(), Some(&(ms(120), 0)));
    assert_eq!(recording.feedback.last(), Some(&(ms(120), FeedbackCommand::DotAlert(false))));
    assert!(!recording.last_render().unwrap().dot_alert_active);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_verification_abandons_request() {
    let keypad = KeypadOrder::canonical();
    let mut script = pin_taps(&keypad, "1234", 0);
    script.push(ScriptedTap::at_ms(100, KeypadKey::Cancel));
    let verifier = ScriptedVerifier::new([VerifyOutcome::Accepted]).with_latency(ms(500));
    let requests = verifier.requests();

    let (outcome, recording) = run_canonical(script, verifier).await;

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert_eq!(requests.lock().unwrap().len(), 1);
    assert!(!recording.tones.contains(&Tone::Confirmed));
    assert_eq!(recording.last_render().unwrap().phase, Phase::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn three_rejections_lock_out_without_final_shake() {
    let keypad = KeypadOrder::canonical();
    let script: Vec<_> =
        [0, 500, 1_000].into_iter().flat_map(|start| pin_taps(&keypad, "9999", start)).collect();

    let verifier = ScriptedVerifier::new([VerifyOutcome::Rejected; 3]);

    let (outcome, recording) = run_canonical(script, verifier).await;

    assert_eq!(outcome, SessionOutcome::LockedOut);
    assert_eq!(recording.pulses(), vec![ms(50), ms(550)]);
    assert_eq!(recording.tones.last(), Some(&Tone::Rejected));

    let prompts: Vec<_> = recording
        .renders
        .iter()
        .filter(|r| r.filled_dot_count == 1)
        .map(|r| (r.attempts_remaining, r.prompt_subtitle))
        .collect();
    assert_eq!(prompts, vec![
        (3, None),
        (2, Some("Try again.")),
        (1, Some("Last attempt remaining.")),
    ]);

    let last = recording.last_render().unwrap();
    assert_eq!(last.phase, Phase::LockedOut);
    assert_eq!(last.attempts_remaining, 0);
    assert!(!last.dot_alert_active);
}

#[tokio::test(start_paused = true)]
async fn unavailable_verifier_keeps_pin_for_retry() {
    let keypad = KeypadOrder::canonical();
    let mut script = pin_taps(&keypad, "2468", 0);
    script.push(ScriptedTap::at_ms(200, KeypadKey::Confirm));
    let verifier = ScriptedVerifier::new([VerifyOutcome::Unavailable, VerifyOutcome::Accepted]);
    let requests = verifier.requests();

    let (outcome, recording) = run_canonical(script, verifier).await;

    assert_eq!(outcome, SessionOutcome::Confirmed);
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);

    let notice = recording.renders.iter().find(|r| r.notice.is_some()).unwrap();
    assert_eq!(notice.notice, Some(Notice::VerifierUnavailable));
    assert_eq!(notice.phase, Phase::Ready);
    assert_eq!(notice.attempts_remaining, 3);
    assert!(recording.feedback.is_empty());
}

#[tokio::test(start_paused = true)]
async fn shuffled_keypad_resolves_positions() {
    let seed = 1234;
    let keypad = KeypadOrder::shuffled(&SimEnv::with_seed(seed));
    let env = SimEnv::with_seed(seed);
    let expected = "7391".parse::<PinCode>().unwrap();
    let verifier = StaticVerifier::new(env.clone(), expected).with_latency(ms(30));

    let runtime = Runtime::new(
        driver(pin_taps(&keypad, "7391", 0)),
        verifier,
        env,
        SessionConfig::default(),
    );
    assert_eq!(runtime.controller().keypad_order(), &keypad);

    assert_eq!(runtime.run().await.unwrap(), SessionOutcome::Confirmed);
}

#[tokio::test(start_paused = true)]
async fn observers_see_every_render() {
    let keypad = KeypadOrder::canonical();
    let script = vec![
        ScriptedTap::at_ms(10, KeypadKey::Digit { position: 4 }),
        ScriptedTap::at_ms(20, KeypadKey::Backspace),
        ScriptedTap::at_ms(30, KeypadKey::Cancel),
    ];
    let driver = driver(script);
    let recording = driver.recording();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut runtime = Runtime::with_keypad(
        driver,
        ScriptedVerifier::new([VerifyOutcome::Rejected]),
        SimEnv::with_seed(0),
        keypad,
        SessionConfig::default(),
    );
    let sink = Arc::clone(&seen);
    runtime.subscribe(Box::new(move |snapshot: &RenderSnapshot| {
        sink.lock().unwrap().push(snapshot.clone());
    }));

    assert_eq!(runtime.run().await.unwrap(), SessionOutcome::Cancelled);

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, recording.lock().unwrap().renders);
    let dots: Vec<_> = seen.iter().map(|r| r.filled_dot_count).collect();
    assert_eq!(dots, vec![0, 1, 0, 0]);
}
