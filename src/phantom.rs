use crate::{
    ConnectOptions, EventHandler, EventKind, Provider, ProviderEvent, PublicKey, Subscription,
    Vendor, WalletAdapter,
    error::{ProviderError, ProviderErrorCode},
    ffi,
};
use std::rc::Rc;
use wasm_bindgen::{JsCast as _, JsValue, closure::Closure};

/// Finds the Phantom wallet injected in the page (`window.solana`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhantomAdapter;

/// [`Provider`] implementation for the Phantom browser extension.
#[derive(Clone, PartialEq)]
pub struct PhantomWallet {
    provider: ffi::PhantomProvider,
}

impl WalletAdapter for PhantomAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Phantom
    }

    /// The extension may inject itself after the page is loaded, make sure
    /// the page is fully loaded before probing.
    fn probe(&self) -> Option<Rc<dyn Provider>> {
        let solana = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("solana")).ok()?;
        if !looks_like_phantom(&solana) {
            return None;
        }

        Some(Rc::new(PhantomWallet {
            provider: solana.unchecked_into(),
        }))
    }
}

fn looks_like_phantom(value: &JsValue) -> bool {
    if !value.is_object() {
        return false;
    }

    let property = |prop: &str| js_sys::Reflect::get(value, &JsValue::from_str(prop)).ok();
    let has_function_property =
        |prop: &str| property(prop).map(|v| v.is_function()).unwrap_or(false);

    // other Solana wallets injecting themselves as `window.solana` don't
    // set `isPhantom`
    property("isPhantom").and_then(|v| v.as_bool()).unwrap_or(false)
        && has_function_property("connect")
        && has_function_property("disconnect")
        && has_function_property("on")
}

impl PhantomWallet {
    /// whether the wallet considers the application connected
    pub fn is_connected(&self) -> bool {
        self.provider.is_connected()
    }
}

/// read the public key out of a `PublicKey` object, or a base58 string
fn decode_public_key(value: &JsValue) -> Result<PublicKey, ProviderError> {
    let text = match value.as_string() {
        Some(text) => text,
        None if value.is_object() => value
            .unchecked_ref::<ffi::SolanaPublicKey>()
            .to_base58()
            .map_err(|error| {
                ProviderError::internal(format!("Couldn't encode the public key: {error:?}"))
            })?,
        None => {
            return Err(ProviderError::internal(format!(
                "Unexpected public key: {value:?}"
            )));
        }
    };

    text.parse()
        .map_err(|error| ProviderError::internal(format!("Invalid public key `{text}': {error}")))
}

fn decode_error(error: JsValue) -> ProviderError {
    serde_wasm_bindgen::from_value(error).unwrap_or_else(|decode_error| ProviderError {
        code: ProviderErrorCode::Internal,
        message: format!("Couldn't decode the error content: {decode_error}"),
    })
}

fn decode_event(kind: EventKind, value: &JsValue) -> Result<ProviderEvent, ProviderError> {
    match kind {
        EventKind::Connect => decode_public_key(value).map(ProviderEvent::Connect),
        EventKind::Disconnect => Ok(ProviderEvent::Disconnect),
        EventKind::AccountChanged if value.is_null() || value.is_undefined() => {
            Ok(ProviderEvent::AccountChanged(None))
        }
        EventKind::AccountChanged => {
            decode_public_key(value).map(|key| ProviderEvent::AccountChanged(Some(key)))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Provider for PhantomWallet {
    fn vendor(&self) -> Vendor {
        Vendor::Phantom
    }

    async fn connect(&self, options: ConnectOptions) -> Result<PublicKey, ProviderError> {
        let options = serde_wasm_bindgen::to_value(&options).map_err(|error| {
            ProviderError::internal(format!("Couldn't encode the connect options: {error}"))
        })?;

        match self.provider.connect(options).await {
            Ok(response) => {
                let public_key = js_sys::Reflect::get(&response, &JsValue::from_str("publicKey"))
                    .map_err(|error| {
                        ProviderError::internal(format!("Unexpected connect response: {error:?}"))
                    })?;
                decode_public_key(&public_key)
            }
            Err(error) => Err(decode_error(error)),
        }
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.provider
            .disconnect()
            .await
            .map(|_| ())
            .map_err(decode_error)
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match decode_event(kind, &value) {
                Ok(event) => handler(event),
                Err(error) => tracing::warn!(event = %kind, %error, "invalid wallet event"),
            }
        });
        self.provider.on(kind.as_str(), &listener);

        let provider = self.provider.clone();
        Subscription::new(move || {
            provider.remove_listener(kind.as_str(), &listener);
            drop(listener);
        })
    }
}
