use crate::{PublicKey, Provider, Subscription};
use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

/// Snapshot of the wallet connection.
#[derive(Clone, Default)]
pub struct ConnectionState {
    pub connected: bool,
    /// the last account the wallet connected with.
    ///
    /// This is kept after the wallet disconnects.
    pub public_key: Option<PublicKey>,
    pub provider: Option<Rc<dyn Provider>>,
}

impl fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionState")
            .field("connected", &self.connected)
            .field("public_key", &self.public_key)
            .field("provider", &self.provider.as_ref().map(|p| p.vendor()))
            .finish()
    }
}

type Observer = Rc<dyn Fn(&ConnectionState)>;

#[derive(Default)]
struct Inner {
    state: ConnectionState,
    next_observer: u64,
    observers: Vec<(u64, Observer)>,
    /// snapshots waiting to be delivered to the observers
    pending: VecDeque<ConnectionState>,
    notifying: bool,
}

/// Shared holder of the [`ConnectionState`].
///
/// Cloning the store gives another handle to the same state. Every setter
/// is applied immediately and the observers are called synchronously with
/// the updated snapshot. The store does not validate anything.
#[derive(Clone, Default)]
pub struct ConnectionStore {
    inner: Rc<RefCell<Inner>>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.inner.borrow().state.clone()
    }

    pub fn connected(&self) -> bool {
        self.inner.borrow().state.connected
    }

    pub fn public_key(&self) -> Option<PublicKey> {
        self.inner.borrow().state.public_key
    }

    pub fn provider(&self) -> Option<Rc<dyn Provider>> {
        self.inner.borrow().state.provider.clone()
    }

    /// a wallet provider was detected
    pub fn is_available(&self) -> bool {
        self.inner.borrow().state.provider.is_some()
    }

    pub fn set_provider(&self, provider: Option<Rc<dyn Provider>>) {
        self.update(|state| state.provider = provider);
    }

    pub fn set_public_key(&self, public_key: Option<PublicKey>) {
        self.update(|state| state.public_key = public_key);
    }

    pub fn set_connected(&self, connected: bool) {
        self.update(|state| state.connected = connected);
    }

    /// call `observer` after every change of the state
    ///
    /// Observers may update the store themselves. Such a change is visible
    /// right away through the getters, the observers are told about it in
    /// order, after all of them saw the change being notified.
    pub fn observe(&self, observer: impl Fn(&ConnectionState) + 'static) -> Subscription {
        let observer: Observer = Rc::new(observer);
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer;
            inner.next_observer += 1;
            inner.observers.push((id, observer));
            id
        };

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .observers
                    .retain(|(observer, _)| *observer != id);
            }
        })
    }

    fn update(&self, change: impl FnOnce(&mut ConnectionState)) {
        {
            let mut inner = self.inner.borrow_mut();
            change(&mut inner.state);
            let snapshot = inner.state.clone();
            inner.pending.push_back(snapshot);
            // a change made by an observer is delivered once every observer
            // saw the current one
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(snapshot) => {
                        let observers: Vec<Observer> =
                            inner.observers.iter().map(|(_, o)| Rc::clone(o)).collect();
                        Some((snapshot, observers))
                    }
                    None => {
                        inner.notifying = false;
                        None
                    }
                }
            };
            let Some((snapshot, observers)) = next else {
                break;
            };

            for observer in observers {
                observer(&snapshot);
            }
        }
    }
}

impl fmt::Debug for ConnectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionStore")
            .field(&self.inner.borrow().state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use std::cell::Cell;

    #[test]
    fn starts_empty() {
        let store = ConnectionStore::new();
        let state = store.snapshot();
        assert!(!state.connected);
        assert!(state.public_key.is_none());
        assert!(state.provider.is_none());
        assert!(!store.is_available());
    }

    #[test]
    fn last_write_wins() {
        let store = ConnectionStore::new();
        let first = PublicKey::new([1; 32]);
        let second = PublicKey::new([2; 32]);

        store.set_connected(true);
        store.set_public_key(Some(first));
        store.set_public_key(Some(second));
        store.set_connected(false);

        assert!(!store.connected());
        assert_eq!(store.public_key(), Some(second));
    }

    #[test]
    fn provider_handle_is_shared() {
        let store = ConnectionStore::new();
        let provider = MockProvider::new();
        store.set_provider(Some(provider.handle()));

        let handle = store.clone();
        assert!(handle.is_available());
        assert!(Rc::ptr_eq(
            &handle.provider().unwrap(),
            &provider.handle()
        ));
    }

    #[test]
    fn observers_see_every_change() {
        let store = ConnectionStore::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let calls = Rc::clone(&calls);
            store.observe(move |state| calls.borrow_mut().push(state.connected))
        };

        store.set_connected(true);
        store.set_connected(false);
        assert_eq!(*calls.borrow(), vec![true, false]);

        subscription.unsubscribe();
        store.set_connected(true);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn observer_may_update_the_store() {
        let store = ConnectionStore::new();
        let count = Rc::new(Cell::new(0));

        let _subscription = {
            let handle = store.clone();
            let count = Rc::clone(&count);
            store.observe(move |state| {
                count.set(count.get() + 1);
                if state.public_key.is_some() && !state.connected {
                    handle.set_connected(true);
                }
            })
        };

        store.set_public_key(Some(PublicKey::new([3; 32])));
        assert!(store.connected());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn nested_changes_are_notified_in_order() {
        let store = ConnectionStore::new();

        let _disconnect_on_swap = {
            let handle = store.clone();
            store.observe(move |state| {
                if state.provider.is_some() && state.connected {
                    handle.set_connected(false);
                }
            })
        };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _display = {
            let seen = Rc::clone(&seen);
            store.observe(move |state| seen.borrow_mut().push(state.connected))
        };

        store.set_connected(true);
        store.set_provider(Some(MockProvider::new().handle()));

        assert!(!store.connected());
        assert_eq!(*seen.borrow(), vec![true, true, false]);
    }
}
