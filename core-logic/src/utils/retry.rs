use crate::traits::Pacer;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded retry for operations the remote side asks us to repeat later.
///
/// The wait between attempts is whatever the server suggested, or
/// `default_delay` when it did not say. No exponential growth and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, first one included. Always at least 1.
    pub max_attempts: u32,
    pub default_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            default_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, default_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            default_delay,
        }
    }
}

/// How a failed attempt should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry after the given delay.
    After(Duration),
    /// Retry after [`RetryConfig::default_delay`].
    Default,
    /// Not retryable.
    Stop,
}

#[derive(Debug)]
pub enum RetryError<E> {
    /// Every attempt asked for a retry and the budget ran out.
    Exhausted {
        attempts: u32,
        waited: Duration,
        last: E,
    },
    /// A non-retryable failure, returned as is.
    Fatal(E),
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted {
                attempts,
                waited,
                last,
            } => write!(
                f,
                "gave up after {} attempts ({:.1}s waited): {}",
                attempts,
                waited.as_secs_f64(),
                last
            ),
            RetryError::Fatal(e) => write!(f, "{}", e),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryError<E> {}

/// Runs `operation` until it succeeds, fails with [`Backoff::Stop`], or
/// `max_attempts` is reached. `operation` receives the 1-based attempt number
/// and is rebuilt on every attempt, so each attempt can carry fresh data.
pub async fn with_retry_after<T, E, F, Fut, C>(
    config: &RetryConfig,
    operation_name: &str,
    pacer: &dyn Pacer,
    mut operation: F,
    classify: C,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> Backoff,
    E: fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut waited = Duration::ZERO;
    let mut attempt = 1;

    loop {
        let err = match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        let delay = match classify(&err) {
            Backoff::Stop => return Err(RetryError::Fatal(err)),
            Backoff::After(d) => d,
            Backoff::Default => config.default_delay,
        };

        if attempt >= max_attempts {
            warn!(
                "{} still asked to retry after {} attempts, giving up",
                operation_name, attempt
            );
            return Err(RetryError::Exhausted {
                attempts: attempt,
                waited,
                last: err,
            });
        }

        warn!(
            "{} asked to retry (attempt {}/{}). Waiting {}s: {}",
            operation_name,
            attempt,
            max_attempts,
            delay.as_secs_f64(),
            err
        );
        pacer.wait(delay).await;
        waited += delay;
        attempt += 1;
    }
}
