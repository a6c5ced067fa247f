//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod logger;
pub(crate) mod pacer;
pub(crate) mod retry;
pub(crate) mod runner;
pub(crate) mod wallet_manager;

// Selective exports - only public utilities
pub use logger::init_from_env;
pub use pacer::{RecordingPacer, TokioPacer};
pub use runner::WorkerRunner;
pub use wallet_manager::WalletManager;
