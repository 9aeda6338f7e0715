//! Scripted verifier.
//!
//! Answers verification requests from a queue of outcomes after a fixed
//! latency on the tokio clock, and records every PIN it was asked about.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use pinpad_app::Verifier;
use pinpad_core::{PinCode, VerifyOutcome};

/// Verifier replaying a fixed list of outcomes.
///
/// Once the list is exhausted every further request is rejected.
#[derive(Debug, Clone)]
pub struct ScriptedVerifier {
    outcomes: Arc<Mutex<VecDeque<VerifyOutcome>>>,
    requests: Arc<Mutex<Vec<PinCode>>>,
    latency: Duration,
}

impl ScriptedVerifier {
    /// Answer requests with `outcomes`, in order.
    pub fn new(outcomes: impl IntoIterator<Item = VerifyOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
        }
    }

    /// Answer only after `latency` has elapsed.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Shared handle to the PINs submitted so far.
    pub fn requests(&self) -> Arc<Mutex<Vec<PinCode>>> {
        Arc::clone(&self.requests)
    }

    fn next_outcome(&self, pin: &PinCode) -> VerifyOutcome {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(pin.clone());
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(VerifyOutcome::Rejected)
    }
}

impl Verifier for ScriptedVerifier {
    async fn verify(&self, pin: &PinCode) -> VerifyOutcome {
        let outcome = self.next_outcome(pin);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tracing::debug!(?outcome, "scripted verification");
        outcome
    }
}
