//! Sequences load tasks in fixed-size batches with a pause between batches.

use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::domain::entities::BatchPlan;

pub const DEFAULT_BATCH_SIZE: usize = 4;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1000);

/// Runs work batch by batch.
///
/// Tasks inside a batch run concurrently on the current task. The next batch
/// starts only after every task of the previous one has finished, plus `delay`.
#[derive(Debug, Clone, Copy)]
pub struct BatchCoordinator {
    batch_size: NonZeroUsize,
    delay: Duration,
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY)
    }
}

impl BatchCoordinator {
    /// Creates a coordinator. A batch size of 0 is treated as 1.
    #[must_use]
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: NonZeroUsize::new(batch_size).unwrap_or(NonZeroUsize::MIN),
            delay,
        }
    }

    /// Returns the batch size.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Returns the inter-batch delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Partitions `items` the way [`Self::run_all`] will.
    #[must_use]
    pub fn plan<T>(&self, items: Vec<T>) -> BatchPlan<T> {
        BatchPlan::new(items, self.batch_size)
    }

    /// Runs `run` over every item and returns the outputs in input order.
    ///
    /// A task that fails still counts as finished; nothing short-circuits.
    pub async fn run_all<T, O, F, Fut>(&self, items: Vec<T>, mut run: F) -> Vec<O>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = O>,
    {
        let plan = self.plan(items);
        let total_batches = plan.len();
        let mut outputs = Vec::new();

        for (index, batch) in plan.into_batches().enumerate() {
            info!(
                batch = index + 1,
                total_batches,
                size = batch.len(),
                "Starting batch"
            );

            let futures: Vec<Fut> = batch.into_iter().map(&mut run).collect();
            outputs.extend(join_all(futures).await);

            if index + 1 < total_batches {
                debug!(delay_ms = self.delay.as_millis(), "Pausing before next batch");
                sleep(self.delay).await;
            }
        }

        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tokio::time::Instant;

    #[derive(Debug, Clone, Copy)]
    struct Span {
        item: usize,
        start: Instant,
        end: Instant,
    }

    async fn run_recorded(coordinator: BatchCoordinator, count: usize) -> (Vec<usize>, Vec<Span>) {
        let spans = Mutex::new(Vec::new());
        let spans_ref = &spans;

        let outputs = coordinator
            .run_all((0..count).collect(), |item| async move {
                let start = Instant::now();
                let work = Duration::from_millis(100 * (item as u64 % 3 + 1));
                sleep(work).await;
                spans_ref.lock().push(Span {
                    item,
                    start,
                    end: Instant::now(),
                });
                item * 10
            })
            .await;

        let mut spans = spans.into_inner();
        spans.sort_by_key(|s| s.item);
        (outputs, spans)
    }

    #[test]
    fn test_zero_batch_size_is_one() {
        let coordinator = BatchCoordinator::new(0, Duration::ZERO);
        assert_eq!(coordinator.batch_size(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nine_tasks_in_batches_of_four() {
        let coordinator = BatchCoordinator::new(4, Duration::from_millis(1000));
        let origin = Instant::now();

        let (outputs, spans) = run_recorded(coordinator, 9).await;

        assert_eq!(outputs, (0..9).map(|i| i * 10).collect::<Vec<_>>());

        let batches: Vec<&[Span]> = vec![&spans[0..4], &spans[4..8], &spans[8..9]];

        for span in batches[0] {
            assert_eq!(span.start, origin);
        }

        for pair in batches.windows(2) {
            let previous_end = pair[0].iter().map(|s| s.end).max().unwrap();
            for span in pair[1] {
                assert!(span.start >= previous_end + Duration::from_millis(1000));
            }
        }

        // Batches of 4 see work durations {100,200,300,100}, {200,300,100,200}, {300}.
        let expected = Duration::from_millis(300 + 1000 + 300 + 1000 + 300);
        assert_eq!(origin.elapsed(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tasks_within_batch_overlap() {
        let coordinator = BatchCoordinator::new(3, Duration::from_millis(500));

        let (_, spans) = run_recorded(coordinator, 3).await;

        let first_end = spans.iter().map(|s| s.end).min().unwrap();
        assert!(spans.iter().all(|s| s.start < first_end));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_batch_has_no_trailing_delay() {
        let coordinator = BatchCoordinator::new(4, Duration::from_secs(5));
        let origin = Instant::now();

        let (outputs, _) = run_recorded(coordinator, 2).await;

        assert_eq!(outputs, vec![0, 10]);
        assert_eq!(origin.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let coordinator = BatchCoordinator::default();
        let outputs: Vec<u8> = coordinator.run_all(Vec::<u8>::new(), |x| async move { x }).await;
        assert!(outputs.is_empty());
    }
}
