use core_logic::{WalletError, WalletIdentity};
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::to_checksum;
use tracing::{info, warn};

/// A configured identity whose key has been parsed. The address used for
/// every call is the one derived from the key, not the configured one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedWallet {
    address: String,
}

impl DerivedWallet {
    pub fn from_identity(identity: &WalletIdentity) -> Result<Self, WalletError> {
        let key = identity.private_key.trim();
        let hex_part = key.strip_prefix("0x").unwrap_or(key);

        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKeyFormat);
        }
        if hex_part.len() != 64 {
            return Err(WalletError::InvalidKeyLength {
                length: hex_part.len(),
            });
        }

        let signer = hex_part
            .parse::<LocalWallet>()
            .map_err(|_| WalletError::InvalidKeyFormat)?;
        let address = to_checksum(&signer.address(), None);

        let configured = identity.address.trim();
        if !configured.is_empty() && !configured.eq_ignore_ascii_case(&address) {
            warn!(
                "{}; using the address derived from the key",
                WalletError::AddressMismatch {
                    expected: identity.address.clone(),
                    actual: address.clone(),
                }
            );
        }

        info!("Wallet initialized: {}", address);
        Ok(Self { address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
