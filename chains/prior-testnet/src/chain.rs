//! Read-only access to the chain: token balance and block height.

use crate::config::PriorConfig;
use crate::error::ChainReadError;
use async_trait::async_trait;
use ethers::abi::Abi;
use ethers::prelude::*;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const ERC20_BALANCE_ABI: &str = r#"[
    {"constant":true,"inputs":[{"name":"_owner","type":"address"}],"name":"balanceOf","outputs":[{"name":"balance","type":"uint256"}],"type":"function"}
]"#;

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Token balance of `address`, already scaled by the token's decimals.
    async fn token_balance(&self, address: &str) -> Result<f64, ChainReadError>;

    async fn block_number(&self) -> Result<u64, ChainReadError>;
}

pub struct EthersChainReader {
    provider: Arc<Provider<Http>>,
    token: Address,
    decimals: u32,
    abi: Abi,
}

impl EthersChainReader {
    pub fn new(config: &PriorConfig) -> Result<Self, ChainReadError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChainReadError::Rpc(e.to_string()))?;

        let url = reqwest::Url::parse(&config.rpc_url)
            .map_err(|e| ChainReadError::Rpc(format!("invalid RPC URL: {}", e)))?;
        let provider = Provider::new(Http::new_with_client(url, client));

        let token = parse_address(&config.token_contract)?;
        let abi: Abi = serde_json::from_str(ERC20_BALANCE_ABI)
            .map_err(|e| ChainReadError::Conversion(e.to_string()))?;

        Ok(Self {
            provider: Arc::new(provider),
            token,
            decimals: u32::from(config.token_decimals),
            abi,
        })
    }
}

#[async_trait]
impl ChainReader for EthersChainReader {
    async fn token_balance(&self, address: &str) -> Result<f64, ChainReadError> {
        info!("Checking token balance for wallet: {}", address);
        let owner = parse_address(address)?;

        let contract = Contract::new(self.token, self.abi.clone(), self.provider.clone());
        let raw: U256 = contract
            .method::<_, U256>("balanceOf", owner)
            .map_err(|e| ChainReadError::Contract {
                method: "balanceOf".to_string(),
                reason: e.to_string(),
            })?
            .call()
            .await
            .map_err(|e| ChainReadError::Contract {
                method: "balanceOf".to_string(),
                reason: e.to_string(),
            })?;

        let balance = scale_balance(raw, self.decimals)?;
        info!("Token balance: {}", balance);
        Ok(balance)
    }

    async fn block_number(&self) -> Result<u64, ChainReadError> {
        let block = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| ChainReadError::Rpc(e.to_string()))?;
        Ok(block.as_u64())
    }
}

pub fn parse_address(address: &str) -> Result<Address, ChainReadError> {
    Address::from_str(address.trim()).map_err(|e| ChainReadError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Raw integer amount to a float with `decimals` places.
pub fn scale_balance(raw: U256, decimals: u32) -> Result<f64, ChainReadError> {
    let formatted = ethers::utils::format_units(raw, decimals)
        .map_err(|e| ChainReadError::Conversion(e.to_string()))?;
    formatted
        .parse::<f64>()
        .map_err(|e| ChainReadError::Conversion(format!("'{}': {}", formatted, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_balance_18_decimals() {
        // 0.3 tokens
        let raw = U256::from(300_000_000_000_000_000u64);
        assert_eq!(scale_balance(raw, 18).unwrap(), 0.3);
        assert_eq!(scale_balance(U256::zero(), 18).unwrap(), 0.0);
    }

    #[test]
    fn test_scale_balance_other_decimals() {
        let raw = U256::from(2_500_000u64);
        assert_eq!(scale_balance(raw, 6).unwrap(), 2.5);
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0xefc91c5a51e8533282486fa2601dffe0a0b16edb").is_ok());
        assert!(matches!(
            parse_address("0xnope"),
            Err(ChainReadError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_reader_builds_from_default_config() {
        let reader = EthersChainReader::new(&PriorConfig::default()).unwrap();
        assert_eq!(reader.decimals, 18);
    }
}
