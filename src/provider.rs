use crate::{ConnectOptions, PublicKey, error::ProviderError};
use std::{fmt, rc::Rc};

/// The wallet vendors this crate knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vendor {
    /// Phantom, injected as `window.solana` with `isPhantom == true`
    Phantom,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Phantom => write!(f, "phantom"),
        }
    }
}

/// Name of the events a provider may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Connect,
    Disconnect,
    AccountChanged,
}

impl EventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Connect => "connect",
            EventKind::Disconnect => "disconnect",
            EventKind::AccountChanged => "accountChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// the wallet is connected to the given account
    Connect(PublicKey),
    Disconnect,
    /// the user switched account in the wallet. `None` if the new account
    /// is not yet authorized for this application.
    AccountChanged(Option<PublicKey>),
}

impl ProviderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProviderEvent::Connect(_) => EventKind::Connect,
            ProviderEvent::Disconnect => EventKind::Disconnect,
            ProviderEvent::AccountChanged(_) => EventKind::AccountChanged,
        }
    }
}

pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Handle on a registered callback.
///
/// The callback is removed when the subscription is dropped or when
/// [`Subscription::unsubscribe`] is called.
#[must_use = "dropping the subscription removes the callback"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// a subscription with nothing to release
    pub fn empty() -> Self {
        Self { dispose: None }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose()
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// An injected wallet provider.
///
/// Implementations are owned by the host environment (the browser
/// extension); the connector only ever holds `Rc<dyn Provider>` handles
/// to them. Two handles are the same provider if they are [`Rc::ptr_eq`].
#[async_trait::async_trait(?Send)]
pub trait Provider {
    /// the vendor marker of this provider
    fn vendor(&self) -> Vendor;

    /// Ask the wallet to connect. With [`ConnectOptions::trusted_only`] the
    /// wallet won't prompt the user and fails if the application was never
    /// approved.
    ///
    /// On success the wallet also emits a [`ProviderEvent::Connect`].
    async fn connect(&self, options: ConnectOptions) -> Result<PublicKey, ProviderError>;

    async fn disconnect(&self) -> Result<(), ProviderError>;

    /// register `handler` for the events of the given `kind`
    fn on(&self, kind: EventKind, handler: EventHandler) -> Subscription;
}

/// Recognise one vendor's provider in the host environment.
pub trait WalletAdapter {
    fn vendor(&self) -> Vendor;

    /// look for the provider, `None` if the wallet extension isn't installed
    fn probe(&self) -> Option<Rc<dyn Provider>>;
}

pub(crate) fn same_provider(a: Option<&Rc<dyn Provider>>, b: Option<&Rc<dyn Provider>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
