use crate::config::PriorConfig;
use crate::sequencer::{SequencerDeps, WalletSequencer};
use core_logic::{RunnerStats, WalletIdentity, WorkerRunner};

/// Runs the wallet sequencer over every wallet, in order, one at a time.
pub struct BatchRunner {
    sequencer: WalletSequencer,
}

impl BatchRunner {
    pub fn new(config: &PriorConfig, deps: SequencerDeps) -> Self {
        Self {
            sequencer: WalletSequencer::new(config, deps),
        }
    }

    /// A failing wallet is logged and counted, never fatal to the batch.
    pub async fn run(&self, wallets: Vec<WalletIdentity>) -> RunnerStats {
        WorkerRunner::run_sequential(&self.sequencer, wallets).await
    }
}
