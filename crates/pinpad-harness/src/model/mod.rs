//! Reference model for model-based testing.
//!
//! [`ModelSession`] re-implements the PIN entry rules in the most direct way
//! possible: plain integers, no typestate, no feedback scheduling. Operations
//! are applied to both the model and the real controller, and their
//! [`ObservableState`]s must agree after every step.

mod operation;
mod session;

pub use operation::{ModelVerdict, Operation, OperationResult};
pub use session::{ModelSession, ObservableState};
