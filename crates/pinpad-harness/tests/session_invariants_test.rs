//! Invariant tests over full runtime sessions.
//!
//! Random tap scripts and verifier answers are played through the production
//! runtime on a paused clock. The simulation driver checks every rendered
//! snapshot against the standard invariant registry, so a violation surfaces
//! as a runtime error.

use std::time::Duration;

use pinpad_app::Runtime;
use pinpad_core::{KeypadKey, SessionConfig, SessionOutcome, VerifyOutcome};
use pinpad_harness::{
    InvariantRegistry, ScriptedTap, ScriptedVerifier, SimDriver, SimDriverError, SimEnv,
};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = KeypadKey> {
    prop_oneof![
        10 => (0usize..10).prop_map(|position| KeypadKey::Digit { position }),
        2 => Just(KeypadKey::Backspace),
        3 => Just(KeypadKey::Confirm),
        1 => Just(KeypadKey::Cancel),
    ]
}

fn outcome_strategy() -> impl Strategy<Value = VerifyOutcome> {
    prop_oneof![
        4 => Just(VerifyOutcome::Rejected),
        1 => Just(VerifyOutcome::Accepted),
        1 => Just(VerifyOutcome::Unavailable),
    ]
}

/// Taps separated by random gaps, some shorter than a feedback step.
fn script_strategy() -> impl Strategy<Value = Vec<ScriptedTap>> {
    prop::collection::vec((key_strategy(), 1u64..250), 0..60).prop_map(|taps| {
        let mut at = 0;
        taps.into_iter()
            .map(|(key, gap)| {
                at += gap;
                ScriptedTap::at_ms(at, key)
            })
            .collect()
    })
}

fn run_session(
    seed: u64,
    script: Vec<ScriptedTap>,
    outcomes: Vec<VerifyOutcome>,
    latency_ms: u64,
) -> Result<SessionOutcome, SimDriverError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    rt.block_on(async move {
        let driver = SimDriver::new(script).with_invariants(InvariantRegistry::standard());
        let verifier =
            ScriptedVerifier::new(outcomes).with_latency(Duration::from_millis(latency_ms));
        let runtime =
            Runtime::new(driver, verifier, SimEnv::with_seed(seed), SessionConfig::default());
        runtime.run().await
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No rendered snapshot ever breaks an invariant.
    #[test]
    fn prop_invariants_hold_for_random_sessions(
        seed in any::<u64>(),
        script in script_strategy(),
        outcomes in prop::collection::vec(outcome_strategy(), 0..6),
        latency_ms in 0u64..400,
    ) {
        match run_session(seed, script, outcomes, latency_ms) {
            Ok(_) | Err(SimDriverError::ScriptExhausted { .. }) => {},
            Err(e @ SimDriverError::InvariantViolated(_)) => {
                return Err(TestCaseError::fail(e.to_string()));
            },
        }
    }

    /// Sessions always end when the script ends in a cancel.
    #[test]
    fn prop_trailing_cancel_always_terminates(
        seed in any::<u64>(),
        mut script in script_strategy(),
        outcomes in prop::collection::vec(outcome_strategy(), 0..6),
    ) {
        let at = script.last().map_or(Duration::ZERO, |tap| tap.at) + Duration::from_millis(10);
        script.push(ScriptedTap { at, key: KeypadKey::Cancel });

        let outcome = run_session(seed, script, outcomes, 50).unwrap();
        prop_assert!(matches!(
            outcome,
            SessionOutcome::Cancelled | SessionOutcome::Confirmed | SessionOutcome::LockedOut
        ));
    }
}
