use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Options passed to the wallet's `connect` method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    /// only connect if the user already approved the application, never
    /// prompt the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_if_trusted: Option<bool>,
}

impl ConnectOptions {
    /// options of the eager (silent) reconnection attempt
    pub const fn trusted_only() -> Self {
        Self {
            only_if_trusted: Some(true),
        }
    }
}

/// Configuration of the [`WalletManager`].
///
/// Every field has a default so the configuration can be given partially,
/// for example from a JSON object on the web application side:
///
/// ```
/// # use phantom_connector::WalletConfig;
/// let config = WalletConfig::from_json(r#"{ "eagerConnect": false }"#).unwrap();
/// assert!(!config.eager_connect);
/// assert_eq!(config.notification_title, "Wallet update");
/// ```
///
/// [`WalletManager`]: crate::WalletManager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletConfig {
    /// title of every notification emitted on connection changes
    pub notification_title: String,
    /// attempt a silent reconnection as soon as the wallet is detected
    pub eager_connect: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            notification_title: "Wallet update".to_owned(),
            eager_connect: true,
        }
    }
}

impl WalletConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// read the configuration from a javascript object
    ///
    /// `undefined` and `null` give the default configuration.
    pub fn from_js(value: JsValue) -> Result<Self, serde_wasm_bindgen::Error> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn trusted_only_json() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_value(ConnectOptions::trusted_only())?,
            json! { { "onlyIfTrusted": true } }
        );
        assert_eq!(serde_json::to_value(ConnectOptions::default())?, json! { {} });
        Ok(())
    }

    #[test]
    fn config_defaults() -> anyhow::Result<()> {
        let config = WalletConfig::from_json("{}")?;
        assert_eq!(config, WalletConfig::default());
        assert!(config.eager_connect);
        assert_eq!(config.notification_title, "Wallet update");
        Ok(())
    }

    #[test]
    fn config_json() -> anyhow::Result<()> {
        let config = WalletConfig::from_json(
            r#"{ "notificationTitle": "Phantom", "eagerConnect": false }"#,
        )?;
        assert_eq!(
            config,
            WalletConfig {
                notification_title: "Phantom".to_owned(),
                eager_connect: false,
            }
        );
        Ok(())
    }
}
