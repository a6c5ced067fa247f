//! Error types for the PRIOR bot.
//!
//! Every variant here aborts the current wallet only. Fatal, run-wide
//! problems are [`core_logic::ConfigError`].

use core_logic::WalletError;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the PRIOR HTTP API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status} from {endpoint}: {message}")]
    Http {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// HTTP 429. `retry_after` is in seconds, when the server said.
    #[error("Rate limited by {endpoint} (retry after {})", fmt_retry_after(.retry_after))]
    RateLimited {
        endpoint: String,
        retry_after: Option<f64>,
    },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

fn fmt_retry_after(retry_after: &Option<f64>) -> String {
    match retry_after {
        Some(secs) => format!("{}s", secs),
        None => "default".to_string(),
    }
}

/// Failures reading from the chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainReadError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Contract call {method} failed: {reason}")]
    Contract { method: String, reason: String },

    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Could not convert balance: {0}")]
    Conversion(String),
}

/// Everything that can stop one wallet's run.
#[derive(Error, Debug)]
pub enum SequencerError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Chain(#[from] ChainReadError),

    #[error("Swap still rate limited after {attempts} attempts ({:.1}s spent waiting)", .waited.as_secs_f64())]
    RateLimitExceeded { attempts: u32, waited: Duration },
}
