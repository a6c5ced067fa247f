use config::{Config, Environment, File};
use core_logic::{ConfigError, RetryConfig};
use ethers::types::Address;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Run configuration for the PRIOR bot.
///
/// Defaults match the live testnet; a TOML file and `PRIOR_*` environment
/// variables override them, in that order.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PriorConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Used for the `origin` and `referer` headers
    #[serde(default = "default_site_origin")]
    pub site_origin: String,
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_token_contract")]
    pub token_contract: String,
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,
    /// Sent verbatim as the swap amount
    #[serde(default = "default_swap_amount")]
    pub swap_amount: String,
    #[serde(default = "default_swap_count")]
    pub swap_count: u32,
    #[serde(default = "default_token_from")]
    pub token_from: String,
    #[serde(default = "default_token_to")]
    pub token_to: String,
    /// Balance at or above which the faucet is skipped
    #[serde(default = "default_min_balance")]
    pub min_balance: f64,
    #[serde(default = "default_swap_delay_secs")]
    pub swap_delay_secs: u64,
    #[serde(default = "default_wallet_delay_secs")]
    pub wallet_delay_secs: u64,
    #[serde(default = "default_rate_limit_default_secs")]
    pub rate_limit_default_secs: u64,
    #[serde(default = "default_rate_limit_max_attempts")]
    pub rate_limit_max_attempts: u32,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://priortestnet.xyz/api".to_string()
}

fn default_site_origin() -> String {
    "https://priortestnet.xyz".to_string()
}

fn default_rpc_url() -> String {
    "https://sepolia.base.org".to_string()
}

fn default_token_contract() -> String {
    "0xefc91c5a51e8533282486fa2601dffe0a0b16edb".to_string()
}

fn default_token_decimals() -> u8 {
    18
}

fn default_swap_amount() -> String {
    "0.05".to_string()
}

fn default_swap_count() -> u32 {
    5
}

fn default_token_from() -> String {
    "PRIOR".to_string()
}

fn default_token_to() -> String {
    "USDC".to_string()
}

fn default_min_balance() -> f64 {
    0.25
}

fn default_swap_delay_secs() -> u64 {
    5
}

fn default_wallet_delay_secs() -> u64 {
    10
}

fn default_rate_limit_default_secs() -> u64 {
    2
}

fn default_rate_limit_max_attempts() -> u32 {
    5
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            site_origin: default_site_origin(),
            rpc_url: default_rpc_url(),
            token_contract: default_token_contract(),
            token_decimals: default_token_decimals(),
            swap_amount: default_swap_amount(),
            swap_count: default_swap_count(),
            token_from: default_token_from(),
            token_to: default_token_to(),
            min_balance: default_min_balance(),
            swap_delay_secs: default_swap_delay_secs(),
            wallet_delay_secs: default_wallet_delay_secs(),
            rate_limit_default_secs: default_rate_limit_default_secs(),
            rate_limit_max_attempts: default_rate_limit_max_attempts(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl PriorConfig {
    pub const ENV_PREFIX: &'static str = "PRIOR";

    /// Loads defaults, then `path` if it exists, then `PRIOR_*` variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ConfigError::Load {
                path: path.to_string(),
                msg: e.to_string(),
            })?;

        let config: PriorConfig = settings.try_deserialize().map_err(|e| ConfigError::Load {
            path: path.to_string(),
            msg: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("api_base_url", &self.api_base_url),
            ("site_origin", &self.site_origin),
            ("rpc_url", &self.rpc_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                return Err(ConfigError::InvalidUrl {
                    field: field.to_string(),
                    url: url.clone(),
                });
            }
        }

        if Address::from_str(&self.token_contract).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "token_contract".to_string(),
                reason: format!("'{}' is not an address", self.token_contract),
            });
        }

        let amount = self.swap_amount_value()?;

        if self.min_balance.is_nan() || self.min_balance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_balance".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.rate_limit_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit_max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.token_from.trim().is_empty() || self.token_to.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "token_from/token_to".to_string(),
            });
        }

        let needed = amount * f64::from(self.swap_count);
        if self.min_balance < needed {
            warn!(
                "min_balance {} is below what {} swaps of {} need ({})",
                self.min_balance, self.swap_count, self.swap_amount, needed
            );
        }

        Ok(())
    }

    fn swap_amount_value(&self) -> Result<f64, ConfigError> {
        match self.swap_amount.trim().parse::<f64>() {
            Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
            _ => Err(ConfigError::InvalidValue {
                field: "swap_amount".to_string(),
                reason: format!("'{}' is not a positive decimal", self.swap_amount),
            }),
        }
    }

    pub fn swap_delay(&self) -> Duration {
        Duration::from_secs(self.swap_delay_secs)
    }

    pub fn wallet_delay(&self) -> Duration {
        Duration::from_secs(self.wallet_delay_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.rate_limit_max_attempts,
            Duration::from_secs(self.rate_limit_default_secs),
        )
    }
}
