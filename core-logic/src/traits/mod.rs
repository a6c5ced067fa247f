use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunnerStats {
    pub success: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RunnerStats {
    pub fn total(&self) -> u64 {
        self.success + self.skipped + self.failed
    }
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub success: bool,
    pub message: String,
    pub tx_hash: Option<String>,
}

#[async_trait]
pub trait Task<Ctx>: Send + Sync {
    /// Returns the name of the task
    fn name(&self) -> &str;

    /// Executes the task
    async fn run(&self, ctx: Ctx) -> Result<TaskResult>;
}

/// Delay policy. Every timed pause in a run goes through this, so tests can
/// swap in a recorder instead of sleeping.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn wait(&self, duration: Duration);
}
