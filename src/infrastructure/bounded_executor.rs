//! Bounded Concurrency Executor
//!
//! Applies an async transform to every item of a batch while keeping at most
//! `limit` transforms in flight. Workers are plain futures joined on the
//! calling task, so nothing is spawned and borrowed data can be used freely.

use futures::future::join_all;
use parking_lot::Mutex;
use std::fmt::Display;
use std::future::Future;

/// Default number of concurrent transforms.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Fixed-size worker pool over a shared work queue.
#[derive(Debug, Clone, Copy)]
pub struct BoundedExecutor {
    limit: usize,
}

impl BoundedExecutor {
    /// Create an executor; a limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Configured concurrency limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `transform` over every item and return each outcome in input position.
    ///
    /// `min(limit, items.len())` workers repeatedly claim the next unclaimed
    /// item from a shared cursor and await its transform before claiming
    /// another. Every item is attempted exactly once.
    pub async fn run_settled<T, R, E, F, Fut>(&self, items: Vec<T>, transform: F) -> Vec<Result<R, E>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let len = items.len();
        if len == 0 {
            return Vec::new();
        }

        let queue = Mutex::new(items.into_iter().enumerate());
        let settled: Mutex<Vec<Option<Result<R, E>>>> =
            Mutex::new(std::iter::repeat_with(|| None).take(len).collect());

        {
            let queue = &queue;
            let slots = &settled;
            let transform = &transform;

            let workers = (0..self.limit.min(len)).map(|_| async move {
                loop {
                    // Guard is released before the transform is awaited
                    let claimed = queue.lock().next();
                    let Some((index, item)) = claimed else {
                        break;
                    };
                    let outcome = transform(item).await;
                    slots.lock()[index] = Some(outcome);
                }
            });
            join_all(workers).await;
        }

        settled.into_inner().into_iter().flatten().collect()
    }

    /// Run `transform` over every item and keep only the successful results.
    ///
    /// Failed items are dropped from the output (logged at debug); relative
    /// order of the survivors matches the input.
    pub async fn map_bounded<T, R, E, F, Fut>(&self, items: Vec<T>, transform: F) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        self.run_settled(items, transform)
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, outcome)| match outcome {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(index, error = %e, "task failed, omitted from results");
                    None
                }
            })
            .collect()
    }
}

impl Default for BoundedExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

/// Map `items` through `transform` with at most `limit` in flight, dropping failures.
pub async fn map_with_concurrency<T, R, E, F, Fut>(items: Vec<T>, limit: usize, transform: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    BoundedExecutor::new(limit).map_bounded(items, transform).await
}
