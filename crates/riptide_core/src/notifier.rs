//! Observable indicator state
//!
//! Rendering collaborators (skins) subscribe to a [`StateNotifier`] and
//! receive an [`IndicatorSnapshot`] whenever it changes. Subscriptions are
//! explicit: `subscribe` returns a key, `unsubscribe` removes it. There is
//! no implicit rebuild machinery.
//!
//! Listeners run during frame processing; they must not synchronously
//! re-enter the pull area (schedule work instead).

use crate::geometry::{Axis, AxisDirection};
use crate::mode::{Edge, IndicatorMode, TaskResult};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key identifying one subscription
    pub struct ListenerId;
}

/// Listener callback invoked with the changed snapshot
pub type Listener = Box<dyn FnMut(&IndicatorSnapshot) + Send>;

/// Everything a skin needs to render one frame of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub edge: Edge,
    pub mode: IndicatorMode,
    /// Current pull distance (always >= 0)
    pub offset: f32,
    pub trigger_offset: f32,
    pub result: TaskResult,
    /// None until the host reports its first layout
    pub axis: Option<Axis>,
    /// None until the host reports its first layout
    pub axis_direction: Option<AxisDirection>,
}

/// Subscribe/unsubscribe state holder with a notify-on-change contract
pub struct StateNotifier {
    listeners: SlotMap<ListenerId, Listener>,
    last: Option<IndicatorSnapshot>,
}

impl StateNotifier {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            last: None,
        }
    }

    /// Register a listener; returns its subscription key
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&IndicatorSnapshot) + Send + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a subscription; returns false if the key was already gone
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Publish a snapshot, notifying listeners only when it differs from
    /// the previously published one
    pub fn publish(&mut self, snapshot: IndicatorSnapshot) {
        if self.last == Some(snapshot) {
            return;
        }
        self.last = Some(snapshot);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }

    /// The most recently published snapshot
    pub fn last(&self) -> Option<IndicatorSnapshot> {
        self.last
    }

    /// Drop all subscriptions (disposal)
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl Default for StateNotifier {
    fn default() -> Self {
        Self::new()
    }
}
