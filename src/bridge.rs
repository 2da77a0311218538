use crate::{
    ConnectionStore, EventHandler, EventKind, Notification, NotificationSink, Provider,
    ProviderEvent, Subscription, WalletConfig, provider::same_provider,
};
use futures::task::{LocalSpawn, LocalSpawnExt as _};
use std::{
    cell::RefCell,
    mem,
    rc::{Rc, Weak},
};

/// Where the [`EventBridge`] is in the lifecycle of the current provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgePhase {
    /// no provider registered yet
    Uninitialized,
    /// listening to the events of the provider
    Subscribed,
    /// the provider emitted `connect`
    Connected,
    /// the provider emitted `disconnect`
    Disconnected,
    /// the bridge was shut down
    TornDown,
}

struct Attachment {
    /// bumped every time the provider is replaced, the handlers of older
    /// generations are ignored.
    generation: u64,
    provider: Option<Rc<dyn Provider>>,
    subscriptions: Vec<Subscription>,
    phase: BridgePhase,
}

struct Shared {
    store: ConnectionStore,
    sink: Rc<dyn NotificationSink>,
    spawner: Rc<dyn LocalSpawn>,
    config: WalletConfig,
    attachment: RefCell<Attachment>,
}

/// Keep the [`ConnectionStore`] in sync with the events of the wallet.
///
/// The bridge observes the store: every time a different provider is
/// registered it releases the previous one and subscribes to the `connect`
/// and `disconnect` events of the new one.
///
/// Releasing a provider (on replacement or on [`EventBridge::teardown`])
/// unsubscribes from its events, asks the wallet to disconnect without
/// waiting for the result and marks the store as disconnected.
pub struct EventBridge {
    shared: Rc<Shared>,
    store_subscription: Option<Subscription>,
}

impl EventBridge {
    pub fn new(
        store: ConnectionStore,
        sink: Rc<dyn NotificationSink>,
        spawner: Rc<dyn LocalSpawn>,
        config: WalletConfig,
    ) -> Self {
        let shared = Rc::new(Shared {
            store: store.clone(),
            sink,
            spawner,
            config,
            attachment: RefCell::new(Attachment {
                generation: 0,
                provider: None,
                subscriptions: Vec::new(),
                phase: BridgePhase::Uninitialized,
            }),
        });

        let weak = Rc::downgrade(&shared);
        let store_subscription = store.observe(move |state| {
            if let Some(shared) = weak.upgrade() {
                shared.sync(state.provider.clone());
            }
        });

        // a provider may already be registered
        shared.sync(store.provider());

        Self {
            shared,
            store_subscription: Some(store_subscription),
        }
    }

    pub fn phase(&self) -> BridgePhase {
        self.shared.attachment.borrow().phase
    }

    /// the provider the bridge is currently listening to
    pub fn provider(&self) -> Option<Rc<dyn Provider>> {
        self.shared.attachment.borrow().provider.clone()
    }

    /// Stop following the store and release the current provider.
    ///
    /// Calling it more than once has no effect.
    pub fn teardown(&mut self) {
        let Some(store_subscription) = self.store_subscription.take() else {
            return;
        };
        store_subscription.unsubscribe();

        let (previous, subscriptions) = {
            let mut attachment = self.shared.attachment.borrow_mut();
            attachment.generation += 1;
            attachment.phase = BridgePhase::TornDown;
            (
                attachment.provider.take(),
                mem::take(&mut attachment.subscriptions),
            )
        };
        tracing::debug!("tearing down the wallet event bridge");
        self.shared.release(previous, subscriptions);
        self.shared.store.set_connected(false);
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Shared {
    fn sync(self: &Rc<Self>, next: Option<Rc<dyn Provider>>) {
        let (previous, subscriptions, generation) = {
            let mut attachment = self.attachment.borrow_mut();
            if attachment.phase == BridgePhase::TornDown
                || same_provider(attachment.provider.as_ref(), next.as_ref())
            {
                return;
            }

            attachment.generation += 1;
            attachment.phase = if next.is_some() {
                BridgePhase::Subscribed
            } else {
                BridgePhase::Uninitialized
            };
            (
                mem::replace(&mut attachment.provider, next.clone()),
                mem::take(&mut attachment.subscriptions),
                attachment.generation,
            )
        };

        let released = previous.is_some();
        self.release(previous, subscriptions);
        if released {
            self.store.set_connected(false);
        }

        let Some(provider) = next else {
            return;
        };
        tracing::debug!(vendor = %provider.vendor(), generation, "subscribing to wallet events");
        let subscriptions = vec![
            provider.on(EventKind::Connect, self.handler(generation)),
            provider.on(EventKind::Disconnect, self.handler(generation)),
        ];

        let mut attachment = self.attachment.borrow_mut();
        if attachment.generation == generation {
            attachment.subscriptions = subscriptions;
        } else {
            // replaced while subscribing
            drop(attachment);
            drop(subscriptions);
        }
    }

    fn handler(self: &Rc<Self>, generation: u64) -> EventHandler {
        let weak: Weak<Self> = Rc::downgrade(self);
        Rc::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_event(generation, event);
            }
        })
    }

    fn on_event(&self, generation: u64, event: ProviderEvent) {
        {
            let mut attachment = self.attachment.borrow_mut();
            if attachment.generation != generation {
                tracing::debug!(
                    event = %event.kind(),
                    generation,
                    current = attachment.generation,
                    "ignoring event of a replaced wallet provider"
                );
                return;
            }
            match event {
                ProviderEvent::Connect(_) => attachment.phase = BridgePhase::Connected,
                ProviderEvent::Disconnect => attachment.phase = BridgePhase::Disconnected,
                ProviderEvent::AccountChanged(_) => return,
            }
        }

        match event {
            ProviderEvent::Connect(public_key) => {
                tracing::info!(%public_key, "wallet connected");
                self.store.set_connected(true);
                self.store.set_public_key(Some(public_key));
                self.sink.notify(Notification {
                    message: self.config.notification_title.clone(),
                    description: format!("Connected to wallet {}", public_key.shortened()),
                });
            }
            ProviderEvent::Disconnect => {
                tracing::info!("wallet disconnected");
                // the last public key is kept on purpose
                self.store.set_connected(false);
                self.sink.notify(Notification {
                    message: self.config.notification_title.clone(),
                    description: "Disconnected from wallet".to_owned(),
                });
            }
            ProviderEvent::AccountChanged(_) => {}
        }
    }

    /// unsubscribe from `previous` and ask it to disconnect, without waiting
    /// for the answer.
    fn release(&self, previous: Option<Rc<dyn Provider>>, subscriptions: Vec<Subscription>) {
        drop(subscriptions);

        let Some(previous) = previous else {
            return;
        };

        let vendor = previous.vendor();
        let disconnect = async move {
            if let Err(error) = previous.disconnect().await {
                tracing::warn!(%vendor, %error, "wallet disconnect failed");
            }
        };
        if let Err(error) = self.spawner.spawn_local(disconnect) {
            tracing::warn!(%vendor, %error, "couldn't schedule the wallet disconnect");
        }
    }
}
