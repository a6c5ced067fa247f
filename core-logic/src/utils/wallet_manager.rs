use crate::config::{WalletIdentity, WalletSource};
use crate::error::ConfigError;
use tracing::{debug, info};

/// Resolves the ordered wallet list from environment variables.
///
/// `WALLETS` (a JSON array of `{address, privateKey}`) wins over the single
/// `WALLET_ADDRESS` / `PRIVATE_KEY` pair. Order is kept as written, since it
/// decides processing order.
#[derive(Debug)]
pub struct WalletManager {
    source: WalletSource,
    wallets: Vec<WalletIdentity>,
}

impl WalletManager {
    pub const WALLETS_VAR: &'static str = "WALLETS";
    pub const ADDRESS_VAR: &'static str = "WALLET_ADDRESS";
    pub const KEY_VAR: &'static str = "PRIVATE_KEY";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(raw) = non_empty(Self::WALLETS_VAR) {
            let wallets = Self::parse_wallet_list(&raw)?;
            info!(
                "[WalletManager] Loaded {} wallets from {}",
                wallets.len(),
                WalletSource::JsonList
            );
            return Ok(Self {
                source: WalletSource::JsonList,
                wallets,
            });
        }

        match (non_empty(Self::ADDRESS_VAR), non_empty(Self::KEY_VAR)) {
            (Some(address), Some(key)) => {
                info!("[WalletManager] Loaded 1 wallet from {}", WalletSource::SinglePair);
                Ok(Self {
                    source: WalletSource::SinglePair,
                    wallets: vec![WalletIdentity::new(address.trim(), key.trim())],
                })
            }
            _ => Err(ConfigError::MissingField {
                field: format!(
                    "{} or {}/{}",
                    Self::WALLETS_VAR,
                    Self::ADDRESS_VAR,
                    Self::KEY_VAR
                ),
            }),
        }
    }

    fn parse_wallet_list(raw: &str) -> Result<Vec<WalletIdentity>, ConfigError> {
        let wallets: Vec<WalletIdentity> =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidValue {
                field: Self::WALLETS_VAR.to_string(),
                reason: format!("malformed wallet JSON: {}", e),
            })?;

        if wallets.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: Self::WALLETS_VAR.to_string(),
                reason: "no wallets configured".to_string(),
            });
        }

        for (i, wallet) in wallets.iter().enumerate() {
            if wallet.private_key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}[{}].privateKey", Self::WALLETS_VAR, i),
                    reason: "empty private key".to_string(),
                });
            }
            debug!("[WalletManager] Wallet {} -> {}", i + 1, wallet.address);
        }

        Ok(wallets)
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.wallets.len()
    }

    pub fn source(&self) -> WalletSource {
        self.source
    }

    /// Configured addresses, in processing order
    pub fn list_wallets(&self) -> Vec<String> {
        self.wallets.iter().map(|w| w.address.clone()).collect()
    }

    pub fn into_wallets(self) -> Vec<WalletIdentity> {
        self.wallets
    }
}
