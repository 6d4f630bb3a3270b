//! Retry executor with exponential, jittered, capped backoff.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const BACKOFF_BASE: Duration = Duration::from_secs(1);
pub const BACKOFF_JITTER_MAX: Duration = Duration::from_secs(1);
pub const BACKOFF_MAX: Duration = Duration::from_secs(64);

/// Source of random jitter, in whole milliseconds.
pub trait JitterSource: Send + Sync {
    /// Returns a value in `0..max_ms` (0 when `max_ms` is 0).
    fn jitter_ms(&self, max_ms: u64) -> u64;
}

/// Uniform jitter from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn jitter_ms(&self, max_ms: u64) -> u64 {
        if max_ms == 0 {
            return 0;
        }
        rand::rng().random_range(0..max_ms)
    }
}

/// Timing parameters of the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total attempts, first one included. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Multiplied by `2^n` for the n-th retry.
    pub base: Duration,
    /// Upper bound (exclusive) of the random jitter.
    pub jitter_max: Duration,
    /// Cap applied to base plus jitter.
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base: BACKOFF_BASE,
            jitter_max: BACKOFF_JITTER_MAX,
            max_delay: BACKOFF_MAX,
        }
    }
}

impl BackoffPolicy {
    /// Policy with the default timings and a custom attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Wait before retry number `retry` (1 for the retry after the first failure):
    /// `min(2^retry * base + jitter, max_delay)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn delay_for(&self, retry: u32, jitter_ms: u64) -> Duration {
        let base = self.base.as_millis() as u64;
        let max_delay = self.max_delay.as_millis() as u64;

        let exponential = base.saturating_mul(2_u64.saturating_pow(retry));
        let total = exponential.saturating_add(jitter_ms);

        Duration::from_millis(total.min(max_delay))
    }
}

/// Attempt bookkeeping for one retry loop.
#[derive(Debug, Clone, Copy)]
struct RetryState {
    attempt_count: u32,
    max_attempts: u32,
}

impl RetryState {
    const fn new(max_attempts: u32) -> Self {
        Self {
            attempt_count: 0,
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
        }
    }

    const fn exhausted(&self) -> bool {
        self.attempt_count >= self.max_attempts
    }
}

/// Runs an operation until it succeeds or the attempt ceiling is reached.
#[derive(Clone)]
pub struct Backoff {
    policy: BackoffPolicy,
    jitter: Arc<dyn JitterSource>,
}

impl Backoff {
    /// Creates an executor drawing jitter from [`RandomJitter`].
    #[must_use]
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            policy,
            jitter: Arc::new(RandomJitter),
        }
    }

    /// Replaces the jitter source.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Invokes `attempt` until it returns `Ok`, sleeping between failures.
    ///
    /// The sleep yields to the runtime, so other loaders keep making progress.
    ///
    /// # Errors
    /// Returns the last error once every attempt has failed.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn run<T, E, F, Fut>(&self, mut attempt: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut state = RetryState::new(self.policy.max_attempts);

        loop {
            state.attempt_count += 1;

            match attempt().await {
                Ok(value) => {
                    if state.attempt_count > 1 {
                        debug!(attempts = state.attempt_count, "Succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(e) if state.exhausted() => {
                    warn!(
                        attempts = state.attempt_count,
                        error = %e,
                        "Giving up after max attempts"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let jitter = self
                        .jitter
                        .jitter_ms(self.policy.jitter_max.as_millis() as u64);
                    let delay = self.policy.delay_for(state.attempt_count, jitter);

                    warn!(
                        attempt = state.attempt_count,
                        max_attempts = state.max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Attempt failed, backing off"
                    );

                    sleep(delay).await;
                }
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffPolicy::default())
    }
}

impl std::fmt::Debug for Backoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backoff")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    /// Fixed jitter that also counts how many waits were scheduled.
    #[derive(Default)]
    struct CountingJitter {
        value: u64,
        draws: AtomicU32,
    }

    impl JitterSource for CountingJitter {
        fn jitter_ms(&self, _max_ms: u64) -> u64 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.value
        }
    }

    fn backoff_with(jitter: &Arc<CountingJitter>, max_attempts: u32) -> Backoff {
        Backoff::new(BackoffPolicy::with_max_attempts(max_attempts))
            .with_jitter(jitter.clone() as Arc<dyn JitterSource>)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_has_no_wait() {
        let jitter = Arc::new(CountingJitter::default());
        let backoff = backoff_with(&jitter, 5);
        let start = Instant::now();

        let result: Result<u8, String> = backoff.run(|| async { Ok(7) }).await;

        assert_eq!(assert_ok!(result), 7);
        assert_eq!(jitter.draws.load(Ordering::SeqCst), 0);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_k_times_then_succeeds() {
        let jitter = Arc::new(CountingJitter::default());
        let backoff = backoff_with(&jitter, 5);
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = backoff
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { if n < 2 { Err("boom") } else { Ok(n) } }
            })
            .await;

        assert_eq!(assert_ok!(result), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(jitter.draws.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(2000 + 4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_stops_at_ceiling() {
        let jitter = Arc::new(CountingJitter {
            value: 250,
            ..CountingJitter::default()
        });
        let backoff = backoff_with(&jitter, 5);
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), String> = backoff
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {n}")) }
            })
            .await;

        assert_eq!(assert_err!(result), "failure 4");
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(jitter.draws.load(Ordering::SeqCst), 4);
        let expected = 2000 + 4000 + 8000 + 16000 + 4 * 250;
        assert_eq!(start.elapsed(), Duration::from_millis(expected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_behaves_as_one() {
        let jitter = Arc::new(CountingJitter::default());
        let backoff = backoff_with(&jitter, 0);
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = backoff
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("nope") }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_bounds_and_cap() {
        let policy = BackoffPolicy::default();

        for retry in 1..=10_u32 {
            let floor = (1000_u64 << retry).min(64_000);
            let ceiling = ((1000_u64 << retry) + 1000).min(64_000);

            let low = policy.delay_for(retry, 0).as_millis() as u64;
            let high = policy.delay_for(retry, 999).as_millis() as u64;

            assert_eq!(low, floor, "retry {retry}");
            assert!(high >= floor && high <= ceiling, "retry {retry}");
        }

        assert_eq!(policy.delay_for(6, 999), Duration::from_secs(64));
        assert_eq!(policy.delay_for(40, 0), Duration::from_secs(64));
    }

    #[test]
    fn test_random_jitter_range() {
        let jitter = RandomJitter;
        for _ in 0..1000 {
            assert!(jitter.jitter_ms(1000) < 1000);
        }
        assert_eq!(jitter.jitter_ms(0), 0);
    }
}
