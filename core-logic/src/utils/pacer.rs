use crate::traits::Pacer;
use async_trait::async_trait;
use std::time::Duration;

/// Real wall-clock pacing.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

pub use recording::RecordingPacer;

mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Virtual clock: returns immediately and remembers every requested pause.
    #[derive(Debug, Default)]
    pub struct RecordingPacer {
        waits: Mutex<Vec<Duration>>,
    }

    impl RecordingPacer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn waits(&self) -> Vec<Duration> {
            self.waits.lock().map(|w| w.clone()).unwrap_or_default()
        }

        pub fn count_of(&self, duration: Duration) -> usize {
            self.waits().iter().filter(|d| **d == duration).count()
        }

        pub fn total(&self) -> Duration {
            self.waits().iter().sum()
        }
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn wait(&self, duration: Duration) {
            if let Ok(mut waits) = self.waits.lock() {
                waits.push(duration);
            }
        }
    }
}
