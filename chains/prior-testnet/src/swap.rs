//! One logical swap, resubmitted while the service rate limits it.

use crate::api::{PriorApi, SwapRequest, SwapResult};
use crate::config::PriorConfig;
use crate::error::{ApiError, SequencerError};
use crate::txhash::TxHashSource;
use core_logic::{with_retry_after, Backoff, Pacer, RetryConfig, RetryError};
use std::time::Duration;
use tracing::info;

/// What to swap; identical across retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub amount: String,
    pub token_from: String,
    pub token_to: String,
}

impl SwapPlan {
    pub fn from_config(config: &PriorConfig) -> Self {
        Self {
            amount: config.swap_amount.clone(),
            token_from: config.token_from.clone(),
            token_to: config.token_to.clone(),
        }
    }

    pub fn request_for(&self, address: &str, tx_hash: String) -> SwapRequest {
        SwapRequest {
            address: address.to_string(),
            amount: self.amount.clone(),
            token_from: self.token_from.clone(),
            token_to: self.token_to.clone(),
            tx_hash,
        }
    }
}

/// Retry decision for a swap failure: only 429 is retried.
pub fn swap_backoff(err: &ApiError) -> Backoff {
    match err {
        ApiError::RateLimited {
            retry_after: Some(secs),
            ..
        } if *secs > 0.0 => Duration::try_from_secs_f64(*secs)
            .map(Backoff::After)
            .unwrap_or(Backoff::Default),
        // No hint, or a zero hint
        ApiError::RateLimited { .. } => Backoff::Default,
        _ => Backoff::Stop,
    }
}

/// Submits `plan` for `address`. Each attempt carries a new transaction hash.
pub async fn submit_with_retry(
    api: &dyn PriorApi,
    pacer: &dyn Pacer,
    hashes: &dyn TxHashSource,
    retry: &RetryConfig,
    address: &str,
    plan: &SwapPlan,
) -> Result<SwapResult, SequencerError> {
    let outcome = with_retry_after(
        retry,
        "swap",
        pacer,
        |attempt| {
            let request = plan.request_for(address, hashes.next_hash());
            info!(
                "Performing swap for wallet: {} ({} {} -> {}, attempt {})",
                address, request.amount, request.token_from, request.token_to, attempt
            );
            async move { api.submit_swap(&request).await }
        },
        swap_backoff,
    )
    .await;

    match outcome {
        Ok(result) => {
            info!("Swap completed Successfully");
            Ok(result)
        }
        Err(RetryError::Exhausted {
            attempts, waited, ..
        }) => Err(SequencerError::RateLimitExceeded { attempts, waited }),
        Err(RetryError::Fatal(e)) => Err(SequencerError::Api(e)),
    }
}
