use crate::{ConnectOptions, ConnectionStore, Provider, WalletAdapter};
use futures::task::{LocalSpawn, LocalSpawnExt as _};
use std::rc::Rc;

/// Look for the wallet in the host environment.
///
/// If the `adapter` finds its provider, the provider is registered in the
/// `store` and a silent reconnection is attempted in the background (see
/// [`ConnectOptions::trusted_only`]). The attempt succeeds only if the user
/// already approved the application; otherwise the wallet rejects it and
/// the rejection is ignored. When the attempt succeeds the wallet emits a
/// `connect` event, this is how the store learns about the connection.
///
/// If the wallet isn't installed, `None` is returned and nothing else
/// happens: no retry, no polling.
pub fn detect(
    adapter: &dyn WalletAdapter,
    store: &ConnectionStore,
    spawner: &dyn LocalSpawn,
) -> Option<Rc<dyn Provider>> {
    let provider = detect_provider(adapter, store)?;
    eager_connect(&provider, spawner);
    Some(provider)
}

/// same as [`detect`] without the silent reconnection
pub(crate) fn detect_provider(
    adapter: &dyn WalletAdapter,
    store: &ConnectionStore,
) -> Option<Rc<dyn Provider>> {
    let Some(provider) = adapter.probe() else {
        tracing::debug!(vendor = %adapter.vendor(), "wallet not found");
        return None;
    };
    tracing::debug!(vendor = %provider.vendor(), "wallet found");

    store.set_provider(Some(Rc::clone(&provider)));
    Some(provider)
}

pub(crate) fn eager_connect(provider: &Rc<dyn Provider>, spawner: &dyn LocalSpawn) {
    let provider = Rc::clone(provider);
    let vendor = provider.vendor();
    let attempt = async move {
        match provider.connect(ConnectOptions::trusted_only()).await {
            Ok(public_key) => tracing::debug!(%vendor, %public_key, "wallet reconnected"),
            Err(error) => tracing::debug!(%vendor, %error, "wallet not reconnected"),
        }
    };
    if let Err(error) = spawner.spawn_local(attempt) {
        tracing::warn!(%vendor, %error, "couldn't schedule the wallet reconnection");
    }
}
