use crate::{
    ConnectOptions, ConnectionState, ConnectionStore, EventBridge, NotificationSink, Provider,
    PublicKey, WalletAdapter, WalletConfig,
    bridge::BridgePhase,
    detector,
    error::ConnectorError,
};
use futures::task::LocalSpawn;
use std::rc::Rc;

/// The wallet connection of a web application.
///
/// Owns the [`ConnectionStore`] and the [`EventBridge`] following it. The
/// application calls [`WalletManager::detect`] once the page is loaded and
/// reads the connection with [`WalletManager::state`] (or observes the
/// [`WalletManager::store`]).
pub struct WalletManager {
    config: WalletConfig,
    store: ConnectionStore,
    bridge: EventBridge,
    spawner: Rc<dyn LocalSpawn>,
    detected: bool,
}

impl WalletManager {
    pub fn new(
        config: WalletConfig,
        sink: Rc<dyn NotificationSink>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        let store = ConnectionStore::new();
        let bridge = EventBridge::new(store.clone(), sink, Rc::clone(&spawner), config.clone());
        Self {
            config,
            store,
            bridge,
            spawner,
            detected: false,
        }
    }

    /// Look for the wallet, once.
    ///
    /// Further calls return the current provider without probing the host
    /// again. Use [`WalletManager::select_provider`] to force a new provider.
    pub fn detect(&mut self, adapter: &dyn WalletAdapter) -> Option<Rc<dyn Provider>> {
        if self.detected {
            return self.store.provider();
        }
        self.detected = true;

        let provider = detector::detect_provider(adapter, &self.store)?;
        if self.config.eager_connect {
            detector::eager_connect(&provider, self.spawner.as_ref());
        }
        Some(provider)
    }

    /// Replace the current provider.
    ///
    /// The previous provider is released by the bridge. No silent
    /// reconnection is attempted with the new provider.
    pub fn select_provider(&mut self, provider: Option<Rc<dyn Provider>>) {
        self.detected = true;
        self.store.set_provider(provider);
    }

    /// Ask the wallet to connect, prompting the user if the application
    /// wasn't approved yet.
    ///
    /// The store is updated by the `connect` event the wallet emits.
    pub async fn connect(&self) -> Result<PublicKey, ConnectorError> {
        let provider = self.store.provider().ok_or(ConnectorError::NoProvider)?;
        let public_key = provider.connect(ConnectOptions::default()).await?;
        Ok(public_key)
    }

    /// Ask the wallet to disconnect and wait for its answer.
    pub async fn disconnect(&self) -> Result<(), ConnectorError> {
        let provider = self.store.provider().ok_or(ConnectorError::NoProvider)?;
        provider.disconnect().await?;
        Ok(())
    }

    pub fn state(&self) -> ConnectionState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn phase(&self) -> BridgePhase {
        self.bridge.phase()
    }

    /// Release the wallet: the events are not followed anymore and the
    /// connection is marked as disconnected.
    pub fn shutdown(&mut self) {
        self.bridge.teardown();
    }
}
