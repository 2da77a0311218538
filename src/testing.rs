//! in memory wallet used by the unit tests

use crate::{
    ConnectOptions, EventHandler, EventKind, Notification, NotificationSink, Provider,
    ProviderEvent, PublicKey, Subscription, Vendor, WalletAdapter,
    error::{ProviderError, ProviderErrorCode},
};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

#[derive(Default)]
struct WalletState {
    handlers: RefCell<Vec<(u64, EventKind, EventHandler)>>,
    next_handler: Cell<u64>,
    account: Cell<Option<PublicKey>>,
    approved: Cell<bool>,
    connect_calls: RefCell<Vec<ConnectOptions>>,
    disconnect_calls: Cell<usize>,
    fail_disconnect: Cell<bool>,
    leak_handlers: Cell<bool>,
}

impl WalletState {
    fn emit(&self, event: ProviderEvent) {
        let kind = event.kind();
        let handlers: Vec<EventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event.clone());
        }
    }
}

struct MockWallet {
    state: Rc<WalletState>,
}

/// A wallet living entirely in memory.
///
/// `connect` and `disconnect` emit the matching events to the registered
/// handlers, the same way the browser extension does.
#[derive(Clone)]
pub(crate) struct MockProvider {
    wallet: Rc<MockWallet>,
}

impl MockProvider {
    /// a wallet without any account
    pub fn new() -> Self {
        Self {
            wallet: Rc::new(MockWallet {
                state: Rc::default(),
            }),
        }
    }

    /// a wallet holding `account` that already approved the application
    pub fn trusted(account: PublicKey) -> Self {
        let provider = Self::new();
        provider.state().account.set(Some(account));
        provider.state().approved.set(true);
        provider
    }

    /// a wallet holding `account` that never approved the application
    pub fn untrusted(account: PublicKey) -> Self {
        let provider = Self::new();
        provider.state().account.set(Some(account));
        provider
    }

    fn state(&self) -> &WalletState {
        &self.wallet.state
    }

    pub fn handle(&self) -> Rc<dyn Provider> {
        self.wallet.clone()
    }

    pub fn emit(&self, event: ProviderEvent) {
        self.state().emit(event)
    }

    pub fn connect_calls(&self) -> Vec<ConnectOptions> {
        self.state().connect_calls.borrow().clone()
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state().disconnect_calls.get()
    }

    pub fn handler_count(&self) -> usize {
        self.state().handlers.borrow().len()
    }

    pub fn fail_disconnect(&self) {
        self.state().fail_disconnect.set(true);
    }

    /// keep the handlers registered even after their subscription is dropped
    pub fn leak_handlers(&self) {
        self.state().leak_handlers.set(true);
    }
}

#[async_trait::async_trait(?Send)]
impl Provider for MockWallet {
    fn vendor(&self) -> Vendor {
        Vendor::Phantom
    }

    async fn connect(&self, options: ConnectOptions) -> Result<PublicKey, ProviderError> {
        let state = &self.state;
        state.connect_calls.borrow_mut().push(options);

        if options.only_if_trusted == Some(true) && !state.approved.get() {
            return Err(ProviderError {
                code: ProviderErrorCode::Unauthorized,
                message: "User has not approved the application".to_owned(),
            });
        }
        let Some(account) = state.account.get() else {
            return Err(ProviderError {
                code: ProviderErrorCode::UserRejected,
                message: "User rejected the request.".to_owned(),
            });
        };

        state.approved.set(true);
        state.emit(ProviderEvent::Connect(account));
        Ok(account)
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        let state = &self.state;
        state.disconnect_calls.set(state.disconnect_calls.get() + 1);
        if state.fail_disconnect.get() {
            return Err(ProviderError::internal("disconnect failed"));
        }
        state.emit(ProviderEvent::Disconnect);
        Ok(())
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        let id = self.state.next_handler.get();
        self.state.next_handler.set(id + 1);
        self.state.handlers.borrow_mut().push((id, kind, handler));

        if self.state.leak_handlers.get() {
            return Subscription::empty();
        }

        let state: Weak<WalletState> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.handlers.borrow_mut().retain(|(h, _, _)| *h != id);
            }
        })
    }
}

/// Adapter finding (or not) a [`MockProvider`].
pub(crate) struct MockAdapter {
    provider: Option<MockProvider>,
    probes: Cell<usize>,
}

impl MockAdapter {
    pub fn installed(provider: &MockProvider) -> Self {
        Self {
            provider: Some(provider.clone()),
            probes: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            provider: None,
            probes: Cell::new(0),
        }
    }

    pub fn probes(&self) -> usize {
        self.probes.get()
    }
}

impl WalletAdapter for MockAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Phantom
    }

    fn probe(&self) -> Option<Rc<dyn Provider>> {
        self.probes.set(self.probes.get() + 1);
        self.provider.as_ref().map(MockProvider::handle)
    }
}

/// Sink keeping every notification it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    notifications: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

pub(crate) fn key(byte: u8) -> PublicKey {
    PublicKey::new([byte; PublicKey::SIZE])
}
