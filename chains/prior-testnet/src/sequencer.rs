//! Per-wallet workflow: authenticate, check eligibility, claim, swap, cool down.

use crate::api::{FaucetClaim, PriorApi, SwapResult};
use crate::chain::ChainReader;
use crate::config::PriorConfig;
use crate::error::SequencerError;
use crate::report::{self, RunSummary};
use crate::swap::{self, SwapPlan};
use crate::txhash::TxHashSource;
use crate::wallet::DerivedWallet;
use anyhow::Context;
use async_trait::async_trait;
use core_logic::{Pacer, RetryConfig, Task, TaskResult, WalletIdentity};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Collaborators the sequencer talks to. Everything external is behind one
/// of these.
#[derive(Clone)]
pub struct SequencerDeps {
    pub api: Arc<dyn PriorApi>,
    pub chain: Arc<dyn ChainReader>,
    pub pacer: Arc<dyn Pacer>,
    pub hashes: Arc<dyn TxHashSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalletState {
    Idle,
    Authenticated,
    EligibilityChecked,
    Claiming,
    Swapping,
    Cooldown,
    Done,
}

impl fmt::Display for WalletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WalletState::Idle => "idle",
            WalletState::Authenticated => "authenticated",
            WalletState::EligibilityChecked => "eligibility-checked",
            WalletState::Claiming => "claiming",
            WalletState::Swapping => "swapping",
            WalletState::Cooldown => "cooldown",
            WalletState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a wallet may or may not swap.
#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    /// Balance already at the threshold; the faucet was not touched
    Funded { balance: f64 },
    /// Faucet claim accepted
    Claimed,
    /// Faucet on cooldown but the re-checked balance is enough
    CooldownFunded { balance: f64 },
    Ineligible { balance: f64 },
}

impl Eligibility {
    pub fn can_swap(&self) -> bool {
        !matches!(self, Eligibility::Ineligible { .. })
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Funded { balance } => write!(f, "funded ({})", balance),
            Eligibility::Claimed => write!(f, "faucet claimed"),
            Eligibility::CooldownFunded { balance } => {
                write!(f, "faucet on cooldown, funded ({})", balance)
            }
            Eligibility::Ineligible { balance } => write!(f, "insufficient balance ({})", balance),
        }
    }
}

/// What happened to one wallet that was not aborted by an error.
#[derive(Debug, Clone)]
pub struct WalletReport {
    pub address: String,
    pub eligibility: Eligibility,
    pub swaps: Vec<SwapResult>,
    pub summary: Option<RunSummary>,
}

impl WalletReport {
    pub fn into_task_result(self) -> TaskResult {
        let success = self.eligibility.can_swap();
        let message = match &self.summary {
            Some(summary) => format!(
                "{}: {} swaps, {} points ({})",
                self.address, summary.swaps_completed, summary.points_earned, self.eligibility
            ),
            None => format!("{}: no swaps ({})", self.address, self.eligibility),
        };
        let tx_hash = self.swaps.last().map(|r| r.transaction.tx_hash.clone());

        TaskResult {
            success,
            message,
            tx_hash,
        }
    }
}

pub struct WalletSequencer {
    deps: SequencerDeps,
    plan: SwapPlan,
    retry: RetryConfig,
    min_balance: f64,
    swap_count: u32,
    swap_delay: Duration,
    wallet_delay: Duration,
}

impl WalletSequencer {
    pub fn new(config: &PriorConfig, deps: SequencerDeps) -> Self {
        Self {
            deps,
            plan: SwapPlan::from_config(config),
            retry: config.retry_config(),
            min_balance: config.min_balance,
            swap_count: config.swap_count,
            swap_delay: config.swap_delay(),
            wallet_delay: config.wallet_delay(),
        }
    }

    /// Runs the whole workflow for one wallet, then pauses before the next
    /// one. The pause happens whatever the outcome.
    pub async fn process(&self, identity: &WalletIdentity) -> Result<WalletReport, SequencerError> {
        let outcome = self.run_wallet(identity).await;

        self.transition(&identity.address, WalletState::Cooldown);
        info!(
            "Waiting {}s before processing next wallet...",
            self.wallet_delay.as_secs()
        );
        self.deps.pacer.wait(self.wallet_delay).await;
        self.transition(&identity.address, WalletState::Done);

        outcome
    }

    async fn run_wallet(&self, identity: &WalletIdentity) -> Result<WalletReport, SequencerError> {
        self.transition(&identity.address, WalletState::Idle);
        let wallet = DerivedWallet::from_identity(identity)?;
        let address = wallet.address();

        info!("Connecting wallet: {}", address);
        self.deps.api.authenticate(address).await?;
        info!("Wallet connected successfully");
        self.transition(address, WalletState::Authenticated);

        let eligibility = self.check_eligibility(address).await?;
        if !eligibility.can_swap() {
            warn!("Skipping swaps for {}: {}", address, eligibility);
            return Ok(WalletReport {
                address: address.to_string(),
                eligibility,
                swaps: Vec::new(),
                summary: None,
            });
        }

        self.transition(address, WalletState::Swapping);
        let swaps = self.swap_loop(address).await?;
        let summary = RunSummary::from_results(&swaps);

        Ok(WalletReport {
            address: address.to_string(),
            eligibility,
            swaps,
            summary,
        })
    }

    /// Balance check, with the faucet as the fallback below the threshold.
    pub async fn check_eligibility(&self, address: &str) -> Result<Eligibility, SequencerError> {
        let balance = self.deps.chain.token_balance(address).await?;
        self.transition(address, WalletState::EligibilityChecked);

        if balance >= self.min_balance {
            info!(
                "Balance {} meets the {} threshold, skipping faucet",
                balance, self.min_balance
            );
            return Ok(Eligibility::Funded { balance });
        }

        self.transition(address, WalletState::Claiming);
        info!("Claiming faucet for wallet: {}", address);
        match self.deps.api.claim_faucet(address).await? {
            FaucetClaim::Claimed => Ok(Eligibility::Claimed),
            FaucetClaim::Cooldown { time_remaining } => {
                info!(
                    "Cannot claim faucet yet. Time remaining: {} hours",
                    time_remaining.as_deref().unwrap_or("unknown")
                );

                let balance = self.deps.chain.token_balance(address).await?;
                if balance >= self.min_balance {
                    info!("But we have sufficient balance to continue with swaps");
                    Ok(Eligibility::CooldownFunded { balance })
                } else {
                    Ok(Eligibility::Ineligible { balance })
                }
            }
        }
    }

    /// `swap_count` swaps, one after another. The first failure ends the loop
    /// after printing what was completed so far.
    async fn swap_loop(&self, address: &str) -> Result<Vec<SwapResult>, SequencerError> {
        let mut swaps = Vec::with_capacity(self.swap_count as usize);

        for i in 1..=self.swap_count {
            let block = match self.deps.chain.block_number().await {
                Ok(n) => n.to_string(),
                Err(_) => "???".to_string(),
            };
            info!("Swap {}/{} (B: {})", i, self.swap_count, block);

            let result = swap::submit_with_retry(
                self.deps.api.as_ref(),
                self.deps.pacer.as_ref(),
                self.deps.hashes.as_ref(),
                &self.retry,
                address,
                &self.plan,
            )
            .await;

            match result {
                Ok(result) => {
                    report::display_transaction(&result);
                    swaps.push(result);
                    self.deps.pacer.wait(self.swap_delay).await;
                }
                Err(e) => {
                    error!("Swap {}/{} failed: {}", i, self.swap_count, e);
                    if let Some(summary) = RunSummary::from_results(&swaps) {
                        report::display_summary(&summary);
                    }
                    return Err(e);
                }
            }
        }

        if let Some(summary) = RunSummary::from_results(&swaps) {
            report::display_summary(&summary);
        }
        Ok(swaps)
    }

    fn transition(&self, address: &str, state: WalletState) {
        debug!("Wallet {} -> {}", address, state);
    }
}

#[async_trait]
impl Task<WalletIdentity> for WalletSequencer {
    fn name(&self) -> &str {
        "PriorSwap"
    }

    async fn run(&self, identity: WalletIdentity) -> anyhow::Result<TaskResult> {
        let report = self
            .process(&identity)
            .await
            .with_context(|| format!("wallet {}", identity.address))?;
        Ok(report.into_task_result())
    }
}
