//! # Core Logic - Shared Utilities for Testnet Bots
//!
//! Chain-agnostic plumbing shared by the bots under `chains/`.
//!
//! ## Modules
//!
//! - [`config`] - Wallet identity types
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions (tasks, pacing)
//! - `utils` - Logger, wallet loading, pacing, retry and the sequential runner

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{WalletIdentity, WalletSource};
pub use error::{ConfigError, WalletError};
pub use traits::{Pacer, RunnerStats, Task, TaskResult};

pub use utils::{init_from_env, RecordingPacer, TokioPacer, WalletManager, WorkerRunner};

pub use utils::retry::{with_retry_after, Backoff, RetryConfig, RetryError};
