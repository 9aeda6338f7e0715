//! Fuzz target for the PIN entry controller against the reference model
//!
//! # Strategy
//!
//! - Random keypad layout from the seed
//! - Arbitrary interleavings of taps, confirms, verifier answers, feedback
//!   completions and cancels, including ones that arrive in the wrong phase
//!
//! # Invariants
//!
//! - Every operation is applied or ignored identically by model and controller
//! - Observable state (digits, attempts, alert, phase) never diverges
//! - Entered digits never exceed the PIN length
//! - Terminal phases accept nothing further

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinpad_core::{
    KeypadKey, KeypadOrder, PinAction, PinEntryController, PinEvent, SessionConfig, PIN_LENGTH,
};
use pinpad_harness::{ModelSession, Operation, OperationResult, SimEnv};

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    ops: Vec<Operation>,
}

fuzz_target!(|input: Input| {
    let env = SimEnv::with_seed(input.seed);
    let mut controller =
        PinEntryController::new(KeypadOrder::shuffled(&env), SessionConfig::default());
    let keypad = controller.keypad_order().digits().map(|d| d.value());
    let mut model = ModelSession::new(keypad);

    for op in input.ops {
        let was_terminal = controller.is_terminal();
        let event = match op {
            Operation::Tap { position } => {
                let key = KeypadKey::Digit { position: usize::from(position % 10) };
                match controller.keypad_order().resolve(key) {
                    Some(event) => event,
                    None => panic!("digit position {position} did not resolve"),
                }
            },
            Operation::Backspace => PinEvent::Backspace,
            Operation::Confirm => PinEvent::Confirm,
            Operation::Cancel => PinEvent::Cancel,
            Operation::Verify(verdict) => PinEvent::Verified(verdict.into()),
            Operation::FeedbackComplete => PinEvent::FeedbackComplete,
        };

        let actions = controller.handle(event);
        let real = if actions.is_empty() {
            OperationResult::Ignored
        } else {
            OperationResult::Applied
        };
        assert_eq!(model.apply(op), real, "result diverged on {op:?}");

        let state = controller.state();
        let observed: Vec<u8> = state.entered_digits().iter().map(|d| d.value()).collect();
        let expected = model.observable_state();
        assert_eq!(observed, expected.digits, "digits diverged on {op:?}");
        assert_eq!(state.attempts_remaining(), expected.attempts_remaining);
        assert_eq!(state.lockout_signal_active(), expected.alert);
        assert_eq!(controller.phase(), expected.phase);
        assert!(state.entered_len() <= PIN_LENGTH);

        if was_terminal {
            assert!(actions.is_empty(), "terminal session reacted to {op:?}");
        }
        if actions.iter().any(|a| matches!(a, PinAction::Finished(_))) {
            assert!(controller.is_terminal());
        }
    }
});
