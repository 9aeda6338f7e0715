//! Screen invariants checked over a session's render history.
//!
//! An invariant is a property every snapshot the PIN screen ever shows must
//! satisfy, whatever the user taps and whatever the verifier answers. Tests
//! that script one scenario check outcomes; invariants are what random
//! sessions are checked against.
//!
//! # Architecture
//!
//! Every [`pinpad_core::RenderSnapshot`] the runtime pushes is appended to a
//! [`SessionSnapshot`] history, then the registered [`Invariant`] checks run
//! against it. Checks that compare consecutive renders (attempt counter,
//! terminal phase) see the whole history.
//!
//! # Usage
//!
//! ```ignore
//! let screen_rules = InvariantRegistry::standard();
//! screen_rules.check_all(&SessionSnapshot::from_renders(renders))?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    AlertClearsDigits, AttemptsMonotonic, ConfirmEnabledIffReady, DigitsWithinBounds,
    LockedOutIffExhausted, PromptMatchesAttempts, TerminalIsFinal,
};
pub use snapshot::SessionSnapshot;

/// Outcome of one invariant check.
pub type InvariantResult = Result<(), Violation>;

/// A render that broke an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Invariant that failed.
    pub invariant: &'static str,
    /// Index of the offending render in the history.
    pub render: usize,
    /// What the render showed.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (render #{}): {}", self.invariant, self.render, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of the rendered PIN screen.
pub trait Invariant: Send + Sync {
    /// Short snake-case identifier used in violation reports.
    fn name(&self) -> &'static str;

    /// Check the history rendered so far.
    ///
    /// Reports the first render that breaks the property.
    fn check(&self, session: &SessionSnapshot) -> InvariantResult;
}

/// Set of invariants run together after every render.
#[derive(Default)]
pub struct InvariantRegistry {
    checks: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Registry with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every PIN screen invariant this crate defines.
    pub fn standard() -> Self {
        Self::new()
            .with(DigitsWithinBounds)
            .with(ConfirmEnabledIffReady)
            .with(AttemptsMonotonic)
            .with(LockedOutIffExhausted)
            .with(PromptMatchesAttempts)
            .with(AlertClearsDigits)
            .with(TerminalIsFinal)
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with<I: Invariant + 'static>(mut self, invariant: I) -> Self {
        self.add(invariant);
        self
    }

    /// Register one more check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.checks.push(Box::new(invariant));
    }

    /// Run every check. On failure, returns one violation per failing check.
    pub fn check_all(&self, session: &SessionSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.checks.iter().filter_map(|check| check.check(session).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Names of the registered checks, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// No check registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvariantRegistry").field("checks", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_is_complete() {
        let names = InvariantRegistry::standard().names();

        assert_eq!(names.len(), 7);
        assert!(names.contains(&"attempts_monotonic"));
        assert!(names.contains(&"terminal_is_final"));
    }

    #[test]
    fn nothing_rendered_nothing_violated() {
        assert!(InvariantRegistry::standard().check_all(&SessionSnapshot::empty()).is_ok());
        assert!(InvariantRegistry::new().is_empty());
    }
}
