//! Snapshot subscribers.
//!
//! Besides the driver's own rendering, any number of observers can follow the
//! PIN screen: an accessibility announcer, a kiosk supervisor, a test probe.
//! Each one receives every [`RenderSnapshot`] the runtime pushes.

use pinpad_core::RenderSnapshot;

/// Callback receiving every pushed snapshot.
pub type SnapshotObserver = Box<dyn FnMut(&RenderSnapshot) + Send>;

/// Handle returned by [`ObserverList::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of snapshot observers.
#[derive(Default)]
pub struct ObserverList {
    next_id: u64,
    observers: Vec<(ObserverId, SnapshotObserver)>,
}

impl ObserverList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: SnapshotObserver) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Deliver a snapshot to every observer.
    pub fn notify(&mut self, snapshot: &RenderSnapshot) {
        for (_, observer) in &mut self.observers {
            observer(snapshot);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList").field("observers", &self.observers.len()).finish()
    }
}
