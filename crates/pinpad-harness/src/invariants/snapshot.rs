//! Render history for invariant checking.
//!
//! Invariants operate on recorded snapshots rather than the live controller,
//! so the same checks run against what a real screen would have shown.

use pinpad_core::RenderSnapshot;

/// Every snapshot rendered during one session, oldest first.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    renders: Vec<RenderSnapshot>,
}

impl SessionSnapshot {
    /// Create an empty history.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a history from recorded renders.
    pub fn from_renders(renders: Vec<RenderSnapshot>) -> Self {
        Self { renders }
    }

    /// Append a render.
    pub fn push(&mut self, render: RenderSnapshot) {
        self.renders.push(render);
    }

    /// All renders, oldest first.
    pub fn renders(&self) -> &[RenderSnapshot] {
        &self.renders
    }

    /// Most recent render.
    pub fn latest(&self) -> Option<&RenderSnapshot> {
        self.renders.last()
    }

    /// Number of renders recorded.
    pub fn len(&self) -> usize {
        self.renders.len()
    }

    /// Check if nothing has been rendered yet.
    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }
}
