/*!

# Phantom Connector

This library is meant to be used for web applications that need to follow
the connection with the Phantom Solana wallet browser extension.

## Features

- Detect the wallet injected in the page
- Silently reconnect if the user already approved the application
- Keep the connection state (connected, public key) in sync with the
  wallet's events
- Release the wallet on shutdown

## Usage

Create a [`WalletManager`] and look for the wallet once the page is loaded:

```no_run
use phantom_connector::{BrowserSpawner, PhantomAdapter, TracingSink, WalletConfig, WalletManager};
use std::rc::Rc;

let mut manager = WalletManager::new(
    WalletConfig::default(),
    Rc::new(TracingSink),
    Rc::new(BrowserSpawner),
);

if manager.detect(&PhantomAdapter).is_none() {
    println!("Phantom is not installed");
}
```

If the user approved the application before, the wallet reconnects without
prompting and the state becomes connected. Otherwise the application asks
the user:

```no_run
# use phantom_connector::{BrowserSpawner, TracingSink, WalletConfig, WalletManager};
# use std::rc::Rc;
# async fn test() -> anyhow::Result<()> {
# let manager = WalletManager::new(WalletConfig::default(), Rc::new(TracingSink), Rc::new(BrowserSpawner));
let public_key = manager.connect().await?;
assert!(manager.state().connected);
# Ok(()) }
```

Changes of the connection are reported to a [`NotificationSink`] and to the
observers of the [`ConnectionStore`].

*/

mod bridge;
mod browser;
mod config;
mod detector;
pub mod error;
pub mod ffi;
mod identity;
mod manager;
mod notification;
mod phantom;
mod provider;
mod state;
#[cfg(test)]
mod testing;

pub use self::{
    bridge::{BridgePhase, EventBridge},
    browser::{BrowserSpawner, CallbackSink},
    config::{ConnectOptions, WalletConfig},
    detector::detect,
    identity::{PublicKey, PublicKeyError, shorten},
    manager::WalletManager,
    notification::{Notification, NotificationSink, TracingSink},
    phantom::{PhantomAdapter, PhantomWallet},
    provider::{
        EventHandler, EventKind, Provider, ProviderEvent, Subscription, Vendor, WalletAdapter,
    },
    state::{ConnectionState, ConnectionStore},
};
