//! Change notification for external display collaborators.
//!
//! Every persisted mutation in a ledger produces a [`ChangeEvent`].
//! Display surfaces (a home-screen widget, a dashboard) subscribe through
//! the [`ChangeBus`] instead of the ledgers calling into any platform
//! broadcast directly.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A persisted mutation some display surface may want to reflect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ChangeEvent {
    HabitAdded { id: Uuid },
    HabitEdited { id: Uuid },
    HabitToggled { id: Uuid, is_completed: bool },
    /// An external progress source updated a habit's count.
    HabitProgress { id: Uuid, current_count: u32 },
    HabitDeleted { id: Uuid },
    MoodAdded { id: Uuid },
    MoodEdited { id: Uuid },
    MoodDeleted { id: Uuid },
    WaterLogged { count: u32 },
    WaterReset,
}

type Subscriber = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Fan-out of [`ChangeEvent`]s to registered subscribers.
///
/// Cloning the bus shares the subscriber list; ledgers and the host hold
/// clones of the same bus. Subscribers run synchronously on the mutating
/// thread and must not block.
#[derive(Clone, Default)]
pub struct ChangeBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked for every subsequent event.
    pub fn subscribe(&self, subscriber: impl Fn(&ChangeEvent) + Send + Sync + 'static) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Box::new(subscriber));
        }
    }

    pub(crate) fn emit(&self, event: ChangeEvent) {
        if let Ok(subscribers) = self.subscribers.lock() {
            for subscriber in subscribers.iter() {
                subscriber(&event);
            }
        }
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.subscribers.lock().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("ChangeBus").field("subscribers", &count).finish()
    }
}
