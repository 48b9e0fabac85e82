//! Owned state containers with replay-last subscriptions
//!
//! A [`Store`] holds one value and broadcasts every transition. Subscribers first
//! receive the current value, then each later value in publish order. Only the
//! owner of the `Store` can publish; consumers get a read-only [`StoreView`].

use log::warn;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const CHANNEL_CAPACITY: usize = 64;

struct Inner<T> {
    value: RwLock<T>,
    tx: broadcast::Sender<T>,
}

/// Writable handle to a shared value
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

/// Read-only handle to a [`Store`]
pub struct StoreView<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Clone for StoreView<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a store holding `initial`
    pub fn new(initial: T) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(initial),
                tx,
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        snapshot(&self.inner)
    }

    /// Replace the value and notify subscribers
    pub fn publish(&self, value: T) {
        let mut current = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
        *current = value.clone();
        // Sending under the write lock keeps subscribe() from missing or doubling a value.
        let _ = self.inner.tx.send(value);
    }

    /// Modify the value in place and notify subscribers
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let mut current = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut current);
        let _ = self.inner.tx.send(current.clone());
    }

    /// Modify the value in place; subscribers are notified only when `f`
    /// reports a change
    pub fn update_if<F: FnOnce(&mut T) -> bool>(&self, f: F) -> bool {
        let mut current = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
        let changed = f(&mut current);
        if changed {
            let _ = self.inner.tx.send(current.clone());
        }
        changed
    }

    /// Subscribe to the value, starting with the current one
    pub fn subscribe(&self) -> Subscriber<T> {
        subscribe(&self.inner)
    }

    /// Read-only handle for consumers
    pub fn view(&self) -> StoreView<T> {
        StoreView {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> StoreView<T> {
    /// Current value
    pub fn get(&self) -> T {
        snapshot(&self.inner)
    }

    /// Run `f` against the current value without cloning it
    pub fn with<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
        let current = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&current)
    }

    /// Subscribe to the value, starting with the current one
    pub fn subscribe(&self) -> Subscriber<T> {
        subscribe(&self.inner)
    }

    /// Whether both handles point at the same store
    pub fn same_store(&self, other: &StoreView<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn snapshot<T: Clone>(inner: &Inner<T>) -> T {
    inner
        .value
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn subscribe<T: Clone>(inner: &Inner<T>) -> Subscriber<T> {
    let current = inner.value.read().unwrap_or_else(PoisonError::into_inner);
    Subscriber {
        pending: Some(current.clone()),
        rx: inner.tx.subscribe(),
    }
}

/// Stream of values published to a store
pub struct Subscriber<T> {
    pending: Option<T>,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscriber<T> {
    /// Next value, or `None` once every handle to the store is gone
    pub async fn next(&mut self) -> Option<T> {
        if let Some(value) = self.pending.take() {
            return Some(value);
        }
        loop {
            match self.rx.recv().await {
                Ok(value) => return Some(value),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("subscriber lagged behind, skipped {} values", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_latest_value_to_new_subscribers() {
        let store = Store::new(1);
        store.publish(2);
        store.publish(3);

        let mut sub = store.subscribe();
        assert_eq!(sub.next().await, Some(3));

        store.publish(4);
        assert_eq!(sub.next().await, Some(4));
    }

    #[tokio::test]
    async fn subscribers_see_the_same_order() {
        let store = Store::new(0);
        let mut a = store.subscribe();
        let mut b = store.view().subscribe();

        for i in 1..=5 {
            store.publish(i);
        }

        for expected in 0..=5 {
            assert_eq!(a.next().await, Some(expected));
            assert_eq!(b.next().await, Some(expected));
        }
    }

    #[tokio::test]
    async fn update_notifies() {
        let store = Store::new(vec![1]);
        let mut sub = store.subscribe();
        assert_eq!(sub.next().await, Some(vec![1]));

        store.update(|v| v.push(2));
        assert_eq!(sub.next().await, Some(vec![1, 2]));
        assert_eq!(store.view().with(|v| v.len()), 2);
    }

    #[tokio::test]
    async fn update_if_skips_unchanged_values() {
        let store = Store::new(3);
        let mut sub = store.subscribe();
        assert_eq!(sub.next().await, Some(3));

        assert!(!store.update_if(|_| false));
        assert!(store.update_if(|v| {
            *v = 1;
            true
        }));
        assert_eq!(sub.next().await, Some(1));
    }

    #[test]
    fn views_know_their_store() {
        let a = Store::new(0);
        let b = Store::new(0);
        assert!(a.view().same_store(&a.view()));
        assert!(!a.view().same_store(&b.view()));
    }

    #[tokio::test]
    async fn closes_when_store_dropped() {
        let store = Store::new("a".to_string());
        let mut sub = store.subscribe();
        drop(store);
        assert_eq!(sub.next().await, Some("a".to_string()));
        assert_eq!(sub.next().await, None);
    }
}
