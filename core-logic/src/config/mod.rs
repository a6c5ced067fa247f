use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A wallet as configured by the operator: public address plus signing key.
///
/// Loaded once at startup and read-only afterwards. The key is wiped on drop
/// and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletIdentity {
    pub address: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

impl WalletIdentity {
    pub fn new(address: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for WalletIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletIdentity")
            .field("address", &self.address)
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}

/// Where the wallet list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletSource {
    /// `WALLETS` holding a JSON array of `{address, privateKey}`
    JsonList,
    /// `WALLET_ADDRESS` + `PRIVATE_KEY`
    SinglePair,
}

impl fmt::Display for WalletSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletSource::JsonList => write!(f, "WALLETS (json list)"),
            WalletSource::SinglePair => write!(f, "WALLET_ADDRESS/PRIVATE_KEY"),
        }
    }
}
