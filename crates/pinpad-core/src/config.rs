//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::FeedbackConfig;

/// Transaction shown above the PIN prompt. Presentation only; nothing in
/// PIN entry validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentContext {
    /// Pre-formatted amount, e.g. `"12.50"`.
    pub amount: String,
    /// Currency label, e.g. `"EUR"`.
    pub currency: String,
}

impl PaymentContext {
    /// Create a payment context.
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self { amount: amount.into(), currency: currency.into() }
    }
}

impl Default for PaymentContext {
    fn default() -> Self {
        Self::new("0.00", "EUR")
    }
}

/// Configuration for one PIN entry session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Failed-attempt feedback parameters.
    pub feedback: FeedbackConfig,
    /// Transaction being authorized.
    pub payment: PaymentContext,
}
