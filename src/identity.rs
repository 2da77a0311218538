use std::{borrow::Cow, fmt, str::FromStr};

/// number of characters after which a textual key is shortened for display
const SHORTEN_THRESHOLD: usize = 20;
/// number of characters kept on each side of a shortened key
const SHORTEN_KEEP: usize = 7;
const SHORTEN_FILLER: &str = ".....";

/// A Solana account public key (ed25519, 32 bytes).
///
/// The textual representation is the base58 encoding, which is what the
/// wallet returns from `publicKey.toBase58()`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; 32]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicKeyError {
    #[error("Invalid base58 encoding: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("Invalid public key length, expected {expected} bytes but got {got}")]
    InvalidLength { expected: usize, got: usize },
}

impl PublicKey {
    pub const SIZE: usize = 32;

    pub const fn new(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    /// the display form used in the wallet notifications
    ///
    /// See [`shorten`].
    pub fn shortened(&self) -> String {
        shorten(&self.to_base58()).into_owned()
    }
}

/// shorten a textual key for display
///
/// Keys of 20 characters or less are returned unchanged, longer keys keep
/// their first 7 and last 7 characters separated by `"....."`.
///
/// ```
/// # use phantom_connector::shorten;
/// assert_eq!(shorten("ABCDEFGHIJKLMNOPQRSTUVWXYZ"), "ABCDEFG.....TUVWXYZ");
/// assert_eq!(shorten("short"), "short");
/// ```
pub fn shorten(text: &str) -> Cow<'_, str> {
    let len = text.chars().count();
    if len <= SHORTEN_THRESHOLD {
        return Cow::Borrowed(text);
    }

    let head: String = text.chars().take(SHORTEN_KEEP).collect();
    let tail: String = text.chars().skip(len - SHORTEN_KEEP).collect();
    Cow::Owned(format!("{head}{SHORTEN_FILLER}{tail}"))
}

impl From<[u8; PublicKey::SIZE]> for PublicKey {
    fn from(bytes: [u8; PublicKey::SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = PublicKeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; Self::SIZE]>::try_from(bytes).map_err(|_| {
            PublicKeyError::InvalidLength {
                expected: Self::SIZE,
                got: bytes.len(),
            }
        })?;
        Ok(Self(bytes))
    }
}

impl FromStr for PublicKey {
    type Err = PublicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec()?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_base58()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl serde::Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
