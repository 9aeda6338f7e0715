//! PIN verification.
//!
//! The controller never checks a PIN itself. When a complete PIN is
//! confirmed the runtime hands it to a [`Verifier`] and feeds the answer back
//! as [`pinpad_core::PinEvent::Verified`].
//!
//! Retry and backoff for a flaky verifier are the verifier's own policy. A
//! verifier that cannot reach a decision answers
//! [`VerifyOutcome::Unavailable`] instead of guessing "rejected".

use std::{future::Future, time::Duration};

use pinpad_core::{Environment, PinCode, VerifyOutcome};

/// Decides whether a PIN is correct.
pub trait Verifier: Send + Sync + 'static {
    /// Check a PIN.
    ///
    /// May take arbitrarily long; the runtime keeps honoring cancel while
    /// this is pending and drops the future if the session is cancelled.
    fn verify(&self, pin: &PinCode) -> impl Future<Output = VerifyOutcome> + Send;
}

/// Verifier holding a single known PIN.
///
/// Answers after a fixed latency measured on the environment clock, which
/// makes it usable both in the terminal front end and under a paused clock.
#[derive(Clone)]
pub struct StaticVerifier<E: Environment> {
    env: E,
    expected: PinCode,
    latency: Duration,
}

impl<E: Environment> StaticVerifier<E> {
    /// Verifier accepting exactly `expected`.
    pub fn new(env: E, expected: PinCode) -> Self {
        Self { env, expected, latency: Duration::ZERO }
    }

    /// Answer only after `latency` has elapsed.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl<E: Environment> Verifier for StaticVerifier<E> {
    async fn verify(&self, pin: &PinCode) -> VerifyOutcome {
        if !self.latency.is_zero() {
            self.env.sleep(self.latency).await;
        }
        if pin.matches(&self.expected) { VerifyOutcome::Accepted } else { VerifyOutcome::Rejected }
    }
}
