use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The provider injected by the Phantom extension as `window.solana`.
    #[derive(Clone, PartialEq)]
    pub type PhantomProvider;

    /// `true` if the application is connected to the wallet.
    #[wasm_bindgen(method, getter, js_name = "isConnected")]
    pub fn is_connected(this: &PhantomProvider) -> bool;

    /// Connect to the wallet and resolve to `{ publicKey }`.
    ///
    /// Prompts the user to approve the application unless
    /// `{ onlyIfTrusted: true }` is given, in which case the promise is
    /// rejected (code `4001`) if the application was never approved.
    ///
    /// On success the wallet emits the `connect` event.
    #[wasm_bindgen(method, catch)]
    pub async fn connect(this: &PhantomProvider, options: JsValue) -> Result<JsValue, JsValue>;

    /// Disconnect from the wallet, the `disconnect` event is emitted.
    #[wasm_bindgen(method, catch)]
    pub async fn disconnect(this: &PhantomProvider) -> Result<JsValue, JsValue>;

    /// Register a listener for `connect`, `disconnect` or `accountChanged`.
    #[wasm_bindgen(method)]
    pub fn on(this: &PhantomProvider, event: &str, listener: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = "removeListener")]
    pub fn remove_listener(
        this: &PhantomProvider,
        event: &str,
        listener: &Closure<dyn FnMut(JsValue)>,
    );
}

#[wasm_bindgen]
extern "C" {
    /// `PublicKey` object of `@solana/web3.js` as given by the wallet.
    #[derive(Clone, PartialEq)]
    pub type SolanaPublicKey;

    #[wasm_bindgen(method, catch, js_name = "toBase58")]
    pub fn to_base58(this: &SolanaPublicKey) -> Result<String, JsValue>;
}
