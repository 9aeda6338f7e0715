//! Generic runtime for PIN entry orchestration.
//!
//! The Runtime drives one PIN screen presentation, coordinating between:
//! - [`PinEntryController`]: the pure state machine
//! - [`Verifier`]: decides whether a confirmed PIN is correct
//! - [`Driver`]: platform-specific input, rendering and actuators
//! - [`FeedbackSchedule`]: the failed-attempt sequence being played
//!
//! Everything happens on one task. Each cycle waits for whichever comes
//! first: the next feedback step, the verifier's answer, or a keypad tap.
//! Events reach the controller strictly one at a time.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use pinpad_core::{
    Environment, FeedbackCommand, FeedbackSequence, KeypadKey, KeypadOrder, PinAction, PinCode,
    PinEntryController, PinEvent, SessionConfig, SessionOutcome, VerifyOutcome,
};

use crate::{Driver, FeedbackSchedule, ObserverId, ObserverList, SnapshotObserver, Verifier};

/// Verification in flight. Dropping it abandons the request.
type PendingVerification = Pin<Box<dyn Future<Output = VerifyOutcome> + Send>>;

/// Generic runtime that orchestrates controller, verifier and driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `V`: PIN verifier
/// - `E`: Environment providing the clock
pub struct Runtime<D, V, E>
where
    D: Driver,
    V: Verifier,
    E: Environment,
{
    driver: D,
    verifier: Arc<V>,
    env: E,
    controller: PinEntryController,
    feedback: Option<FeedbackSchedule<E::Instant>>,
    verification: Option<PendingVerification>,
    observers: ObserverList,
}

impl<D, V, E> Runtime<D, V, E>
where
    D: Driver,
    V: Verifier,
    E: Environment,
{
    /// Create a runtime for a new session with a freshly shuffled keypad.
    pub fn new(driver: D, verifier: V, env: E, config: SessionConfig) -> Self {
        let keypad = KeypadOrder::shuffled(&env);
        Self::with_keypad(driver, verifier, env, keypad, config)
    }

    /// Create a runtime for a new session on a caller-chosen keypad.
    pub fn with_keypad(
        driver: D,
        verifier: V,
        env: E,
        keypad: KeypadOrder,
        config: SessionConfig,
    ) -> Self {
        Self::with_controller(driver, verifier, env, PinEntryController::new(keypad, config))
    }

    /// Create a runtime around an existing controller.
    pub fn with_controller(
        driver: D,
        verifier: V,
        env: E,
        controller: PinEntryController,
    ) -> Self {
        Self {
            driver,
            verifier: Arc::new(verifier),
            env,
            controller,
            feedback: None,
            verification: None,
            observers: ObserverList::new(),
        }
    }

    /// Register a snapshot observer.
    pub fn subscribe(&mut self, observer: SnapshotObserver) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a snapshot observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Run the session until it reaches a terminal phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. The driver is
    /// stopped either way.
    pub async fn run(mut self) -> Result<SessionOutcome, D::Error> {
        let result = self.run_session().await;
        self.stop_feedback_silently();
        self.driver.stop();
        result
    }

    async fn run_session(&mut self) -> Result<SessionOutcome, D::Error> {
        self.render()?;

        loop {
            if let Some(outcome) = self.controller.outcome() {
                tracing::info!(?outcome, "PIN entry session finished");
                return Ok(outcome);
            }
            self.process_cycle().await?;
        }
    }

    /// Wait for one input source and process it.
    async fn process_cycle(&mut self) -> Result<(), D::Error> {
        let now = self.env.now();
        let feedback_wait = self.feedback.as_ref().and_then(|s| s.time_until_next(now));
        let has_feedback = feedback_wait.is_some();
        let has_verification = self.verification.is_some();

        tokio::select! {
            biased;

            () = self.env.sleep(feedback_wait.unwrap_or(Duration::ZERO)), if has_feedback => {
                self.advance_feedback()
            }

            outcome = await_verification(&mut self.verification), if has_verification => {
                self.verification = None;
                self.dispatch(PinEvent::Verified(outcome))
            }

            key = self.driver.poll_key() => {
                match key? {
                    Some(key) => self.handle_key(key),
                    None => Ok(()),
                }
            }
        }
    }

    /// Translate a keypad tap through the session permutation.
    fn handle_key(&mut self, key: KeypadKey) -> Result<(), D::Error> {
        match self.controller.keypad_order().resolve(key) {
            Some(event) => self.dispatch(event),
            None => {
                tracing::warn!(?key, "tap outside keypad ignored");
                Ok(())
            },
        }
    }

    /// Feed one event to the controller and execute its actions.
    fn dispatch(&mut self, event: PinEvent) -> Result<(), D::Error> {
        let actions = self.controller.handle(event);
        self.process_actions(actions)
    }

    fn process_actions(&mut self, actions: Vec<PinAction>) -> Result<(), D::Error> {
        for action in actions {
            match action {
                PinAction::Render => self.render()?,
                PinAction::Verify { pin } => self.begin_verification(pin),
                PinAction::Feedback(sequence) => self.start_feedback(sequence)?,
                PinAction::StopFeedback => self.stop_feedback()?,
                PinAction::PlayTone(tone) => self.driver.play_tone(tone),
                PinAction::Finished(outcome) => {
                    if self.verification.take().is_some() {
                        tracing::debug!(?outcome, "pending verification abandoned");
                    }
                },
            }
        }
        Ok(())
    }

    fn begin_verification(&mut self, pin: PinCode) {
        let verifier = Arc::clone(&self.verifier);
        self.verification = Some(Box::pin(async move { verifier.verify(&pin).await }));
    }

    fn start_feedback(&mut self, sequence: FeedbackSequence) -> Result<(), D::Error> {
        if self.feedback.is_some() {
            tracing::warn!("feedback requested while another sequence is playing");
        }
        self.feedback = Some(FeedbackSchedule::start(sequence, self.env.now()));
        self.advance_feedback()
    }

    /// Apply every due feedback command; report completion to the controller.
    fn advance_feedback(&mut self) -> Result<(), D::Error> {
        let now = self.env.now();
        let Some(schedule) = self.feedback.as_mut() else {
            return Ok(());
        };

        let due = schedule.take_due(now);
        let complete = schedule.is_complete();
        for command in due {
            self.driver.feedback(command)?;
        }

        if complete {
            self.feedback = None;
            self.dispatch(PinEvent::FeedbackComplete)?;
        }
        Ok(())
    }

    /// Drop the schedule and put actuators back at rest.
    fn stop_feedback(&mut self) -> Result<(), D::Error> {
        if self.feedback.take().is_some() {
            tracing::debug!("in-flight feedback stopped");
        }
        self.driver.feedback(FeedbackCommand::Displace(0))?;
        self.driver.feedback(FeedbackCommand::DotAlert(false))
    }

    fn stop_feedback_silently(&mut self) {
        if self.feedback.is_some()
            && let Err(e) = self.stop_feedback()
        {
            tracing::warn!("Failed to reset feedback on shutdown: {:?}", e);
        }
    }

    fn render(&mut self) -> Result<(), D::Error> {
        let snapshot = self.controller.snapshot();
        self.observers.notify(&snapshot);
        self.driver.render(&snapshot)
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &PinEntryController {
        &self.controller
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// Resolve the pending verification, or never if there is none.
async fn await_verification(slot: &mut Option<PendingVerification>) -> VerifyOutcome {
    match slot.as_mut() {
        Some(verification) => verification.as_mut().await,
        None => std::future::pending().await,
    }
}
