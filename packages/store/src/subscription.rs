//! # Listener registration and cancellation handles
//!
//! [`ListenerRegistry`] keeps the live listeners of one notifier (a store, an
//! auth provider). Registering returns a [`Subscription`]; cancelling it removes
//! the entry, and once `cancel` returns the entry is never handed out again.
//! Cancellation is idempotent and also happens on drop.
//!
//! Listeners are invoked outside the registry lock, so a listener may cancel
//! its own subscription or register new ones while being notified.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

struct Entry<T> {
    active: Arc<AtomicBool>,
    value: T,
}

struct Inner<T> {
    next_id: u64,
    entries: BTreeMap<u64, Entry<T>>,
}

/// Registry of listener entries keyed by registration order.
pub struct ListenerRegistry<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
        }
    }
}

impl<T> std::fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry and return the handle that removes it.
    pub fn register(&self, value: T) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.insert(
                id,
                Entry {
                    active: Arc::clone(&active),
                    value,
                },
            );
            id
        };

        let registry: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            active.store(false, Ordering::SeqCst);
            if let Some(inner) = registry.upgrade() {
                lock(&inner).entries.remove(&id);
            }
        })
    }

    /// Call `f` for every entry still registered, in registration order.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        let entries: Vec<(Arc<AtomicBool>, T)> = lock(&self.inner)
            .entries
            .values()
            .map(|e| (Arc::clone(&e.active), e.value.clone()))
            .collect();

        for (active, value) in entries {
            // An earlier listener in this pass may have cancelled this one.
            if active.load(Ordering::SeqCst) {
                f(&value);
            }
        }
    }
}

impl<T> ListenerRegistry<T> {
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancellation handle for a registered listener.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// A handle with nothing to cancel.
    pub fn empty() -> Self {
        Self {
            cancel: Mutex::new(None),
        }
    }

    /// Stop notifications. Safe to call any number of times.
    pub fn cancel(&self) {
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    type Listener = Arc<dyn Fn(u32) + Send + Sync>;

    #[test]
    fn test_cancel_is_idempotent() {
        let registry: ListenerRegistry<Listener> = ListenerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = registry.register(Arc::new(move |_: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        registry.for_each(|l| l(1));
        sub.cancel();
        sub.cancel();
        registry.for_each(|l| l(2));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
        assert!(sub.is_cancelled());
    }

    #[test]
    fn test_drop_cancels() {
        let registry: ListenerRegistry<Listener> = ListenerRegistry::new();
        {
            let _sub = registry.register(Arc::new(|_: u32| {}));
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listener_cancelled_mid_pass_is_skipped() {
        let registry: ListenerRegistry<Listener> = ListenerRegistry::new();
        let second_hits = Arc::new(AtomicUsize::new(0));

        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot_for_first = Arc::clone(&slot);
        let _first = registry.register(Arc::new(move |_: u32| {
            if let Some(sub) = slot_for_first.lock().unwrap().take() {
                sub.cancel();
            }
        }));
        let counter = Arc::clone(&second_hits);
        let second = registry.register(Arc::new(move |_: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        *slot.lock().unwrap() = Some(second);

        registry.for_each(|l| l(0));
        assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_after_registry_dropped() {
        let registry: ListenerRegistry<Listener> = ListenerRegistry::new();
        let sub = registry.register(Arc::new(|_: u32| {}));
        drop(registry);
        sub.cancel();
        assert!(sub.is_cancelled());
    }
}
