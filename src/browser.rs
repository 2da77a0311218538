//! Glue with the browser: task spawning and notifications to javascript.

use crate::{Notification, NotificationSink};
use futures::{
    future::LocalFutureObj,
    task::{LocalSpawn, SpawnError},
};

/// Spawn the background tasks on the browser's event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// Forward the notifications to a javascript function.
///
/// The function is called with a `{ message, description }` object, its
/// return value is ignored.
#[derive(Debug, Clone)]
pub struct CallbackSink {
    callback: js_sys::Function,
}

impl CallbackSink {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl NotificationSink for CallbackSink {
    fn notify(&self, notification: Notification) {
        let value = match serde_wasm_bindgen::to_value(&notification) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "couldn't encode the wallet notification");
                return;
            }
        };

        if let Err(error) = self.callback.call1(&wasm_bindgen::JsValue::NULL, &value) {
            tracing::warn!(?error, "wallet notification callback failed");
        }
    }
}
