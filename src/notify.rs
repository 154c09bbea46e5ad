//! Toast notifications as an explicit publish/subscribe registry.
//!
//! Components subscribe when they mount and keep the returned
//! [`Subscription`]; dropping it unsubscribes. Any number of subscribers may
//! be live at once, and dispatching with none is not an error.

use std::collections::BTreeMap;
use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError,
    Weak,
};

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

/// Subscriber callback
type Callback = Arc<dyn Fn(&Toast) + Send + Sync>;

/// Subscribers keyed by registration order.
#[derive(Default)]
struct Registry {
    /// Id handed to the next subscriber
    next_id: u64,
    /// Live callbacks
    subscribers: BTreeMap<u64, Callback>,
}

/// Cloneable handle to a toast registry; clones share subscribers.
#[derive(Clone, Default)]
pub struct ToastDispatcher {
    /// Shared registry
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for ToastDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Locks the registry, recovering from poisoning.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // Callbacks never run under this lock, so poisoning carries no torn state.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ToastDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` until the returned subscription is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Toast) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.insert(id, Arc::new(callback));
        tracing::debug!(id, "Toast subscriber registered");

        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Delivers `toast` to every live subscriber; returns how many received it.
    ///
    /// Callbacks run outside the registry lock, so they may subscribe or
    /// unsubscribe themselves.
    pub fn dispatch(&self, toast: &Toast) -> usize {
        let callbacks: Vec<Callback> = lock(&self.registry).subscribers.values().cloned().collect();
        if callbacks.is_empty() {
            tracing::debug!(level = ?toast.level, "Toast dispatched with no subscribers");
        }

        for callback in &callbacks {
            callback(toast);
        }
        callbacks.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).subscribers.len()
    }
}

/// Live registration with a [`ToastDispatcher`].
#[derive(Debug)]
pub struct Subscription {
    /// Key in the registry
    id: u64,
    /// Registry to remove from; gone once every dispatcher is dropped
    registry: Weak<Mutex<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).subscribers.remove(&self.id);
            tracing::debug!(id = self.id, "Toast subscriber removed");
        }
    }
}
