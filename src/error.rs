/// Error codes returned by the injected provider.
///
/// Phantom follows the EIP-1193 / JSON-RPC numbering for its errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ProviderErrorCode {
    /// Also returned by `connect({ onlyIfTrusted: true })` when the
    /// application was never approved by the user.
    #[error("The user rejected the request.")]
    UserRejected,
    #[error("The requested method and/or account has not been authorized by the user.")]
    Unauthorized,
    #[error("The provider is disconnected from all chains.")]
    Disconnected,
    #[error("Missing or invalid parameters.")]
    InvalidInput,
    #[error("The requested resource is not available.")]
    ResourceUnavailable,
    #[error("The transaction was rejected.")]
    TransactionRejected,
    #[error("The method does not exist or is not available.")]
    MethodNotFound,
    #[error("Something went wrong within the wallet.")]
    Internal,
    #[error("Unknown error code `{0}'")]
    Unknown(i64),
}

#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error, serde::Deserialize,
)]
#[error("{code} {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ProviderErrorCode::Internal,
            message: message.into(),
        }
    }
}

/// Errors of the user facing [`WalletManager`] operations.
///
/// [`WalletManager`]: crate::WalletManager
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("No wallet provider was detected")]
    NoProvider,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl<'de> serde::Deserialize<'de> for ProviderErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = ProviderErrorCode;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "Expecting an integer ProviderErrorCode")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    4001 => Ok(ProviderErrorCode::UserRejected),
                    4100 => Ok(ProviderErrorCode::Unauthorized),
                    4900 => Ok(ProviderErrorCode::Disconnected),
                    -32000 => Ok(ProviderErrorCode::InvalidInput),
                    -32002 => Ok(ProviderErrorCode::ResourceUnavailable),
                    -32003 => Ok(ProviderErrorCode::TransactionRejected),
                    -32601 => Ok(ProviderErrorCode::MethodNotFound),
                    -32603 => Ok(ProviderErrorCode::Internal),
                    unknown => Ok(ProviderErrorCode::Unknown(unknown)),
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let v = i64::try_from(v).map_err(|_| {
                    E::invalid_value(serde::de::Unexpected::Unsigned(v), &self)
                })?;
                self.visit_i64(v)
            }

            // javascript numbers come through `serde-wasm-bindgen` as floats
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.fract() != 0.0 {
                    return Err(E::invalid_value(serde::de::Unexpected::Float(v), &self));
                }
                self.visit_i64(v as i64)
            }
        }

        deserializer.deserialize_i64(Visitor)
    }
}
