use crate::traits::{RunnerStats, Task};
use tracing::{error, info, warn, Instrument};

pub struct WorkerRunner;

impl WorkerRunner {
    /// Runs `task` once per item, strictly in order, one at a time.
    ///
    /// A failing item is logged and counted; the run always moves on to the
    /// next one.
    pub async fn run_sequential<Ctx, T>(task: &T, items: Vec<Ctx>) -> RunnerStats
    where
        T: Task<Ctx> + ?Sized,
        Ctx: Send,
    {
        let start_time = std::time::Instant::now();
        let total = items.len();
        info!("Starting {} with {} wallets...", task.name(), total);

        let mut stats = RunnerStats::default();

        for (i, item) in items.into_iter().enumerate() {
            let id = i + 1;
            let span = tracing::info_span!("worker", worker_id = format!("{:03}", id));

            async {
                info!("Processing wallet {}/{}", id, total);
                match task.run(item).await {
                    Ok(res) if res.success => {
                        stats.success += 1;
                        info!(target: "task_result", "[WK:{:03}] Success [{}] {}", id, task.name(), res.message);
                    }
                    Ok(res) => {
                        stats.skipped += 1;
                        warn!(target: "task_result", "[WK:{:03}] Skipped [{}] {}", id, task.name(), res.message);
                    }
                    Err(e) => {
                        stats.failed += 1;
                        error!(target: "task_result", "[WK:{:03}] Failed [{}] {:#}", id, task.name(), e);
                    }
                }
            }
            .instrument(span)
            .await;
        }

        let total_duration = start_time.elapsed();
        let rate = if stats.total() > 0 {
            (stats.success as f64 / stats.total() as f64) * 100.0
        } else {
            0.0
        };

        info!("All wallets processed.");
        info!(
            "Total Time: {:.1}s | Total Success: {} | Skipped: {} | Total Fail: {} | Success Rate: {:.2}%",
            total_duration.as_secs_f64(),
            stats.success,
            stats.skipped,
            stats.failed,
            rate
        );

        stats
    }
}
