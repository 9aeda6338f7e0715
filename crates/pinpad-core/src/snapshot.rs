//! Render snapshot.
//!
//! [`RenderSnapshot`] is everything the rendering surface needs to draw the
//! PIN screen. The runtime pushes one after every state mutation. It is a
//! plain value: holding one never borrows the controller.

use serde::{Deserialize, Serialize};

use crate::{PIN_LENGTH, Phase};

/// Transient message shown below the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// The verifier could not be reached; the entered PIN is kept.
    VerifierUnavailable,
}

impl Notice {
    /// Display text.
    pub fn text(self) -> &'static str {
        match self {
            Self::VerifierUnavailable => "PIN could not be checked. Confirm to retry.",
        }
    }
}

/// Observable PIN screen state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    /// Dots drawn filled.
    pub filled_dot_count: usize,
    /// Total dots, always [`PIN_LENGTH`].
    pub total_dot_count: usize,
    /// Prompt main line.
    pub prompt_title: &'static str,
    /// Prompt secondary line.
    pub prompt_subtitle: Option<&'static str>,
    /// Confirm key is actionable.
    pub confirm_enabled: bool,
    /// Unfilled dots use the alert color.
    pub dot_alert_active: bool,
    /// Controller phase.
    pub phase: Phase,
    /// Remaining verification attempts.
    pub attempts_remaining: u8,
    /// Transient notice. `None` if nothing to report.
    pub notice: Option<Notice>,
    /// Amount being authorized.
    pub amount: String,
    /// Currency label.
    pub currency: String,
}

impl RenderSnapshot {
    /// Dots drawn empty.
    pub fn unfilled_dot_count(&self) -> usize {
        self.total_dot_count.saturating_sub(self.filled_dot_count)
    }

    /// Whether the dot row is complete.
    pub fn is_full(&self) -> bool {
        self.filled_dot_count == PIN_LENGTH
    }
}
