//! # PRIOR Testnet Bot
//!
//! Authenticates wallets against the PRIOR testnet, tops them up from the
//! faucet when their PRIOR balance is low, and runs a fixed number of paced
//! swaps per wallet.
//!
//! ## Modules
//!
//! - [`config`] - Run configuration (defaults, TOML, `PRIOR_*` env)
//! - [`api`] - HTTP client for auth, faucet and swap
//! - [`chain`] - Read-only token balance and block height
//! - [`wallet`] - Key parsing and address derivation
//! - [`swap`] - Rate-limit aware swap submission
//! - [`sequencer`] - Per-wallet workflow
//! - [`runner`] - Sequential batch over all wallets
//! - [`report`] - Transaction and summary output

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod sequencer;
pub mod swap;
pub mod txhash;
pub mod wallet;

pub use config::PriorConfig;
pub use error::{ApiError, ChainReadError, SequencerError};
pub use runner::BatchRunner;
pub use sequencer::{Eligibility, SequencerDeps, WalletReport, WalletSequencer};
pub use txhash::{RandomTxHash, TxHashSource};
