//! Standard invariant checks.
//!
//! These invariants capture behavioral properties of the PIN screen that
//! must always hold, whatever the user taps and whatever the verifier says.

use pinpad_core::{Phase, PromptKind, RenderSnapshot};

use super::{Invariant, InvariantResult, SessionSnapshot, Violation};

/// Run `check` on every render, reporting the first failure.
fn each_render(
    name: &'static str,
    session: &SessionSnapshot,
    check: impl Fn(&RenderSnapshot) -> Option<String>,
) -> InvariantResult {
    for (index, render) in session.renders().iter().enumerate() {
        if let Some(message) = check(render) {
            return Err(Violation { invariant: name, render: index, message });
        }
    }
    Ok(())
}

/// Run `check` on every pair of consecutive renders.
fn each_transition(
    name: &'static str,
    session: &SessionSnapshot,
    check: impl Fn(&RenderSnapshot, &RenderSnapshot) -> Option<String>,
) -> InvariantResult {
    for (index, pair) in session.renders().windows(2).enumerate() {
        if let Some(message) = check(&pair[0], &pair[1]) {
            return Err(Violation { invariant: name, render: index + 1, message });
        }
    }
    Ok(())
}

/// Entered digit count stays within `0..=total`.
pub struct DigitsWithinBounds;

impl Invariant for DigitsWithinBounds {
    fn name(&self) -> &'static str {
        "digits_within_bounds"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_render(self.name(), session, |r| {
            (r.filled_dot_count > r.total_dot_count)
                .then(|| format!("{} of {} dots filled", r.filled_dot_count, r.total_dot_count))
        })
    }
}

/// Confirm is enabled exactly in the ready phase, and only with a full PIN.
pub struct ConfirmEnabledIffReady;

impl Invariant for ConfirmEnabledIffReady {
    fn name(&self) -> &'static str {
        "confirm_enabled_iff_ready"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_render(self.name(), session, |r| {
            if r.confirm_enabled != (r.phase == Phase::Ready) {
                return Some(format!("confirm_enabled={} in {:?}", r.confirm_enabled, r.phase));
            }
            (r.confirm_enabled && !r.is_full())
                .then(|| format!("confirm enabled with {} digits", r.filled_dot_count))
        })
    }
}

/// Attempts never increase and drop by at most one between renders.
pub struct AttemptsMonotonic;

impl Invariant for AttemptsMonotonic {
    fn name(&self) -> &'static str {
        "attempts_monotonic"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_transition(self.name(), session, |before, after| {
            let (was, now) = (before.attempts_remaining, after.attempts_remaining);
            (now > was || was - now > 1).then(|| format!("attempts went {was} → {now}"))
        })
    }
}

/// Locked out exactly when no attempts remain.
pub struct LockedOutIffExhausted;

impl Invariant for LockedOutIffExhausted {
    fn name(&self) -> &'static str {
        "locked_out_iff_exhausted"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_render(self.name(), session, |r| {
            ((r.phase == Phase::LockedOut) != (r.attempts_remaining == 0))
                .then(|| format!("{:?} with {} attempts left", r.phase, r.attempts_remaining))
        })
    }
}

/// Prompt text follows the attempt counter.
pub struct PromptMatchesAttempts;

impl Invariant for PromptMatchesAttempts {
    fn name(&self) -> &'static str {
        "prompt_matches_attempts"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_render(self.name(), session, |r| {
            let expected = PromptKind::for_attempts(r.attempts_remaining).prompt();
            let mismatch =
                r.prompt_title != expected.title || r.prompt_subtitle != expected.subtitle;
            mismatch.then(|| format!("{:?} at {} attempts", r.prompt_title, r.attempts_remaining))
        })
    }
}

/// While the failure alert is shown the entered PIN is empty.
///
/// A rejection clears the digits before the alert starts and input is
/// dropped until it ends, so a filled dot under an active alert means a
/// digit slipped through.
pub struct AlertClearsDigits;

impl Invariant for AlertClearsDigits {
    fn name(&self) -> &'static str {
        "alert_clears_digits"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_render(self.name(), session, |r| {
            (r.dot_alert_active && r.filled_dot_count > 0)
                .then(|| format!("{} digits entered during alert", r.filled_dot_count))
        })
    }
}

/// Once a terminal phase is rendered, nothing changes afterwards.
pub struct TerminalIsFinal;

impl Invariant for TerminalIsFinal {
    fn name(&self) -> &'static str {
        "terminal_is_final"
    }

    fn check(&self, session: &SessionSnapshot) -> InvariantResult {
        each_transition(self.name(), session, |before, after| {
            (before.phase.is_terminal() && before != after)
                .then(|| format!("render changed after {:?}", before.phase))
        })
    }
}

#[cfg(test)]
mod tests {
    use pinpad_core::{
        Digit, KeypadOrder, PinEntryController, PinEvent, SessionConfig, VerifyOutcome,
    };

    use super::*;
    use crate::InvariantRegistry;

    fn controller() -> PinEntryController {
        PinEntryController::new(KeypadOrder::canonical(), SessionConfig::default())
    }

    fn history_of(events: &[PinEvent]) -> SessionSnapshot {
        let mut controller = controller();
        let mut session = SessionSnapshot::empty();
        session.push(controller.snapshot());
        for event in events {
            let _ = controller.handle(*event);
            session.push(controller.snapshot());
        }
        session
    }

    fn digit(value: u8) -> PinEvent {
        PinEvent::Digit(Digit::new(value).unwrap())
    }

    #[test]
    fn rejected_attempts_hold_all_invariants() {
        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend([digit(1), digit(2), digit(3), digit(4), PinEvent::Confirm]);
            events.push(PinEvent::Verified(VerifyOutcome::Rejected));
            events.push(digit(9));
            events.push(PinEvent::FeedbackComplete);
        }

        let session = history_of(&events);
        assert!(InvariantRegistry::standard().check_all(&session).is_ok());
        assert_eq!(session.latest().unwrap().phase, Phase::LockedOut);
    }

    #[test]
    fn detects_attempt_increase() {
        let mut session = history_of(&[]);
        let mut later = session.latest().unwrap().clone();
        session.push(later.clone());
        later.attempts_remaining += 1;
        session.push(later);

        let err = AttemptsMonotonic.check(&session).unwrap_err();
        assert_eq!(err.render, 2);
    }

    #[test]
    fn detects_confirm_without_full_pin() {
        let mut render = controller().snapshot();
        render.confirm_enabled = true;
        render.phase = Phase::Ready;

        let session = SessionSnapshot::from_renders(vec![render]);
        assert!(ConfirmEnabledIffReady.check(&session).is_err());
    }

    #[test]
    fn detects_digit_during_alert() {
        let mut render = controller().snapshot();
        render.dot_alert_active = true;
        render.filled_dot_count = 1;

        let session = SessionSnapshot::from_renders(vec![render]);
        let err = AlertClearsDigits.check(&session).unwrap_err();
        assert_eq!(err.invariant, "alert_clears_digits");
    }

    #[test]
    fn detects_change_after_terminal() {
        let mut session = history_of(&[PinEvent::Cancel]);
        let mut revived = session.latest().unwrap().clone();
        revived.filled_dot_count = 1;
        session.push(revived);

        assert!(TerminalIsFinal.check(&session).is_err());
    }
}
