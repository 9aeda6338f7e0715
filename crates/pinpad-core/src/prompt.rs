//! Title and subtitle shown above the PIN dots.

use serde::{Deserialize, Serialize};

/// Which prompt the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    /// No failed attempt yet.
    Neutral,
    /// One attempt failed, more than one left.
    TryAgain,
    /// Only one attempt left.
    LastAttempt,
}

/// Prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Main line.
    pub title: &'static str,
    /// Secondary line, if any.
    pub subtitle: Option<&'static str>,
}

impl PromptKind {
    /// Prompt for the current attempt budget.
    ///
    /// Reads the counter after any decrement: a fresh session (3) is neutral,
    /// 2 means "try again", anything lower is the last attempt.
    pub fn for_attempts(attempts_remaining: u8) -> Self {
        match attempts_remaining {
            3.. => Self::Neutral,
            2 => Self::TryAgain,
            _ => Self::LastAttempt,
        }
    }

    /// Text for this prompt.
    pub fn prompt(self) -> Prompt {
        match self {
            Self::Neutral => Prompt { title: "Enter PIN", subtitle: None },
            Self::TryAgain => Prompt { title: "Incorrect PIN", subtitle: Some("Try again.") },
            Self::LastAttempt => {
                Prompt { title: "Incorrect PIN", subtitle: Some("Last attempt remaining.") }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_follows_attempts() {
        assert_eq!(PromptKind::for_attempts(3), PromptKind::Neutral);
        assert_eq!(PromptKind::for_attempts(2), PromptKind::TryAgain);
        assert_eq!(PromptKind::for_attempts(1), PromptKind::LastAttempt);
        assert_eq!(PromptKind::for_attempts(0), PromptKind::LastAttempt);
    }

    #[test]
    fn neutral_has_no_subtitle() {
        let prompt = PromptKind::Neutral.prompt();
        assert_eq!(prompt.title, "Enter PIN");
        assert_eq!(prompt.subtitle, None);
    }

    #[test]
    fn failure_prompts_share_title() {
        let again = PromptKind::TryAgain.prompt();
        let last = PromptKind::LastAttempt.prompt();
        assert_eq!(again.title, last.title);
        assert_eq!(again.subtitle, Some("Try again."));
        assert_eq!(last.subtitle, Some("Last attempt remaining."));
    }
}
