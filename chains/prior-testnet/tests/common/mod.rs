#![allow(dead_code)]

use async_trait::async_trait;
use core_logic::{RecordingPacer, WalletIdentity};
use prior_testnet::api::{
    AuthResult, FaucetClaim, PriorApi, SwapRequest, SwapResult, SwapTransaction, UserStats,
};
use prior_testnet::chain::ChainReader;
use prior_testnet::{ApiError, ChainReadError, PriorConfig, SequencerDeps, TxHashSource};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

// anvil/hardhat development accounts #0 and #1
pub const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ADDR_A: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const KEY_B: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const ADDR_B: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub fn wallet_a() -> WalletIdentity {
    WalletIdentity::new(ADDR_A, KEY_A)
}

pub fn wallet_b() -> WalletIdentity {
    WalletIdentity::new(ADDR_B, KEY_B)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Auth(String),
    Faucet(String),
    Swap(SwapRequest),
}

/// Scripted response for one swap submission.
#[derive(Debug, Clone, Copy)]
pub enum SwapReply {
    Ok,
    RateLimited(Option<f64>),
    Http(u16),
}

#[derive(Debug, Clone)]
pub enum FaucetReply {
    Claimed,
    Cooldown,
    Http(u16),
}

/// API double. Swaps succeed unless a reply was queued; the faucet claims
/// unless told otherwise.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<ApiCall>>,
    auth_failures: Mutex<HashSet<String>>,
    faucet: Mutex<HashMap<String, FaucetReply>>,
    swaps: Mutex<VecDeque<SwapReply>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_auth_for(&self, address: &str) {
        self.auth_failures.lock().unwrap().insert(address.to_string());
    }

    pub fn set_faucet(&self, address: &str, reply: FaucetReply) {
        self.faucet.lock().unwrap().insert(address.to_string(), reply);
    }

    pub fn queue_swaps(&self, replies: &[SwapReply]) {
        self.swaps.lock().unwrap().extend(replies.iter().copied());
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn swap_requests(&self) -> Vec<SwapRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Swap(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn faucet_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::Faucet(_)))
            .count()
    }

    pub fn auth_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Auth(a) => Some(a),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PriorApi for MockApi {
    async fn authenticate(&self, address: &str) -> Result<AuthResult, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Auth(address.to_string()));
        if self.auth_failures.lock().unwrap().contains(address) {
            return Err(ApiError::Http {
                endpoint: "/auth".into(),
                status: 401,
                message: "Unauthorized".into(),
            });
        }
        Ok(AuthResult::default())
    }

    async fn claim_faucet(&self, address: &str) -> Result<FaucetClaim, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Faucet(address.to_string()));
        let reply = self
            .faucet
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or(FaucetReply::Claimed);
        match reply {
            FaucetReply::Claimed => Ok(FaucetClaim::Claimed),
            FaucetReply::Cooldown => Ok(FaucetClaim::Cooldown {
                time_remaining: Some("12".into()),
            }),
            FaucetReply::Http(status) => Err(ApiError::Http {
                endpoint: "/faucet/claim".into(),
                status,
                message: "faucet error".into(),
            }),
        }
    }

    async fn submit_swap(&self, request: &SwapRequest) -> Result<SwapResult, ApiError> {
        let number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(ApiCall::Swap(request.clone()));
            calls.iter().filter(|c| matches!(c, ApiCall::Swap(_))).count()
        };
        let reply = self.swaps.lock().unwrap().pop_front().unwrap_or(SwapReply::Ok);
        match reply {
            SwapReply::Ok => Ok(swap_result(request, number)),
            SwapReply::RateLimited(retry_after) => Err(ApiError::RateLimited {
                endpoint: "/swap".into(),
                retry_after,
            }),
            SwapReply::Http(status) => Err(ApiError::Http {
                endpoint: "/swap".into(),
                status,
                message: "swap error".into(),
            }),
        }
    }
}

pub fn swap_result(request: &SwapRequest, number: usize) -> SwapResult {
    SwapResult {
        transaction: SwapTransaction {
            id: number.to_string(),
            kind: "swap".into(),
            amount: request.amount.clone(),
            token_from: request.token_from.clone(),
            token_to: request.token_to.clone(),
            status: "completed".into(),
            timestamp: Some(serde_json::json!("2025-04-20T10:15:00.000Z")),
            tx_hash: request.tx_hash.clone(),
        },
        points_earned: 10.0,
        user: UserStats {
            id: "user".into(),
            address: request.address.clone(),
            total_points: 10.0 * number as f64,
            daily_points: 10.0 * number as f64,
            last_faucet_claim: None,
        },
    }
}

/// Chain double. Each address has a queue of balances; the last one repeats.
#[derive(Default)]
pub struct MockChain {
    balances: Mutex<HashMap<String, VecDeque<f64>>>,
    balance_reads: Mutex<Vec<String>>,
    block_fails: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_blocks() -> Self {
        Self {
            block_fails: true,
            ..Default::default()
        }
    }

    pub fn set_balances(&self, address: &str, balances: &[f64]) {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), balances.iter().copied().collect());
    }

    pub fn balance_reads(&self, address: &str) -> usize {
        self.balance_reads
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.as_str() == address)
            .count()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn token_balance(&self, address: &str) -> Result<f64, ChainReadError> {
        self.balance_reads.lock().unwrap().push(address.to_string());
        let mut balances = self.balances.lock().unwrap();
        let queue = balances
            .get_mut(address)
            .ok_or_else(|| ChainReadError::Rpc(format!("no balance for {}", address)))?;
        let balance = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().copied()
        };
        balance.ok_or_else(|| ChainReadError::Rpc("empty balance script".into()))
    }

    async fn block_number(&self) -> Result<u64, ChainReadError> {
        if self.block_fails {
            return Err(ChainReadError::Rpc("connection refused".into()));
        }
        Ok(1_000)
    }
}

/// Deterministic hashes: 0x...01, 0x...02, ...
#[derive(Default)]
pub struct SequentialHashes {
    next: AtomicU64,
}

impl TxHashSource for SequentialHashes {
    fn next_hash(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("0x{:064x}", n)
    }
}

pub struct Harness {
    pub api: Arc<MockApi>,
    pub chain: Arc<MockChain>,
    pub pacer: Arc<RecordingPacer>,
    pub config: PriorConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_chain(MockChain::new())
    }

    pub fn with_chain(chain: MockChain) -> Self {
        Self {
            api: Arc::new(MockApi::new()),
            chain: Arc::new(chain),
            pacer: Arc::new(RecordingPacer::new()),
            config: PriorConfig::default(),
        }
    }

    pub fn deps(&self) -> SequencerDeps {
        SequencerDeps {
            api: self.api.clone(),
            chain: self.chain.clone(),
            pacer: self.pacer.clone(),
            hashes: Arc::new(SequentialHashes::default()),
        }
    }
}
