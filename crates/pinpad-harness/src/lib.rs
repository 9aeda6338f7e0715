//! Deterministic simulation harness for PIN entry testing.
//!
//! Simulated implementations of the Environment, Driver and Verifier traits
//! that run the production [`pinpad_app::Runtime`] on tokio's paused clock
//! with a seeded RNG. Every keypad shuffle, tap and feedback step is
//! reproducible from the seed and the tap script.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the PIN entry
//! rules. Operations are applied to both the model and the real controller,
//! and their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties of the rendered snapshot history
//! that must hold on every execution path. Use
//! [`InvariantRegistry::standard()`] for the full set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod sim_driver;
pub mod sim_env;
pub mod sim_verifier;

pub use invariants::{
    AlertClearsDigits, AttemptsMonotonic, ConfirmEnabledIffReady, DigitsWithinBounds, Invariant,
    InvariantRegistry, InvariantResult, LockedOutIffExhausted, PromptMatchesAttempts,
    SessionSnapshot, TerminalIsFinal, Violation,
};
pub use model::{ModelSession, ModelVerdict, ObservableState, Operation, OperationResult};
pub use sim_driver::{Recording, ScriptedTap, SimDriver, SimDriverError};
pub use sim_env::SimEnv;
pub use sim_verifier::ScriptedVerifier;
