use anyhow::Result;
use async_trait::async_trait;
use core_logic::{RunnerStats, Task, TaskResult, WorkerRunner};
use std::sync::Mutex;

/// Records every item it sees; fails on items listed in `fail_on`.
struct RecordingTask {
    seen: Mutex<Vec<u32>>,
    fail_on: Vec<u32>,
    skip_on: Vec<u32>,
}

impl RecordingTask {
    fn new(fail_on: Vec<u32>, skip_on: Vec<u32>) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            fail_on,
            skip_on,
        }
    }
}

#[async_trait]
impl Task<u32> for RecordingTask {
    fn name(&self) -> &str {
        "recording"
    }

    async fn run(&self, ctx: u32) -> Result<TaskResult> {
        self.seen.lock().unwrap().push(ctx);
        if self.fail_on.contains(&ctx) {
            anyhow::bail!("item {} exploded", ctx);
        }
        Ok(TaskResult {
            success: !self.skip_on.contains(&ctx),
            message: format!("item {}", ctx),
            tx_hash: None,
        })
    }
}

#[tokio::test]
async fn test_runner_visits_every_item_in_order() {
    let task = RecordingTask::new(vec![], vec![]);
    let stats = WorkerRunner::run_sequential(&task, vec![3, 1, 2]).await;

    assert_eq!(*task.seen.lock().unwrap(), vec![3, 1, 2]);
    assert_eq!(
        stats,
        RunnerStats {
            success: 3,
            skipped: 0,
            failed: 0
        }
    );
}

#[tokio::test]
async fn test_runner_isolates_failures() {
    let task = RecordingTask::new(vec![1], vec![]);
    let stats = WorkerRunner::run_sequential(&task, vec![1, 2, 3]).await;

    // The failing first item does not stop the rest
    assert_eq!(*task.seen.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.success, 2);
}

#[tokio::test]
async fn test_runner_counts_skips_separately() {
    let task = RecordingTask::new(vec![3], vec![2]);
    let stats = WorkerRunner::run_sequential(&task, vec![1, 2, 3, 4]).await;

    assert_eq!(stats.success, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.total(), 4);
}

#[tokio::test]
async fn test_runner_with_no_items() {
    let task = RecordingTask::new(vec![], vec![]);
    let stats = WorkerRunner::run_sequential(&task, Vec::new()).await;

    assert!(task.seen.lock().unwrap().is_empty());
    assert_eq!(stats, RunnerStats::default());
}
