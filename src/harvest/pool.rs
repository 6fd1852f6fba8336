//! Ordered scatter/gather over a bounded worker pool
//!
//! Fan-out / key-preserving fan-in: every item becomes an independent task,
//! at most `width` run at once, completions are consumed in completion
//! order (for progress reporting), and the gathered results are handed
//! back sorted by key. The sort is the only ordering contract; execution
//! order is unconstrained.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Runs one task per item with bounded parallelism and key-sorted results
///
/// # Arguments
///
/// * `items` - The work items to scatter
/// * `width` - Maximum number of tasks in flight (minimum 1)
/// * `task` - Builds the future for one item; each returns a `(key, value)` pair
/// * `on_complete` - Called as `(completed, total)` after each task finishes,
///   in completion order
///
/// # Returns
///
/// All gathered `(key, value)` pairs sorted by key ascending. A task that
/// panics is logged and dropped from the results; it does not abort the
/// pool.
pub async fn scatter_ordered<T, K, R, F, Fut, P>(
    items: Vec<T>,
    width: usize,
    task: F,
    mut on_complete: P,
) -> Vec<(K, R)>
where
    K: Ord + Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = (K, R)> + Send + 'static,
    P: FnMut(usize, usize),
{
    let total = items.len();
    let semaphore = Arc::new(Semaphore::new(width.max(1)));
    let mut tasks = JoinSet::new();

    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let fut = task(item);
        tasks.spawn(async move {
            // Never closed while tasks hold the Arc
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("worker pool semaphore closed");
            fut.await
        });
    }

    let mut completed = 0;
    let mut results = Vec::with_capacity(total);

    while let Some(joined) = tasks.join_next().await {
        completed += 1;
        match joined {
            Ok(pair) => results.push(pair),
            Err(e) => tracing::error!("Worker task aborted: {}", e),
        }
        on_complete(completed, total);
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_sorted_by_key() {
        // Later keys finish first; the gather must still come back ordered
        let items: Vec<u32> = (1..=8).collect();
        let results = scatter_ordered(
            items,
            8,
            |n| async move {
                tokio::time::sleep(Duration::from_millis(u64::from(80 / n))).await;
                (n, n * 10)
            },
            |_, _| {},
        )
        .await;

        let keys: Vec<u32> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (1..=8).collect::<Vec<_>>());
        assert_eq!(results[2], (3, 30));
    }

    #[tokio::test]
    async fn test_width_bounds_concurrency() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<u32> = (1..=20).collect();
        let (in_flight_ref, peak_ref) = (in_flight.clone(), peak.clone());
        scatter_ordered(
            items,
            3,
            move |n| {
                let in_flight = in_flight_ref.clone();
                let peak = peak_ref.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    (n, ())
                }
            },
            |_, _| {},
        )
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_progress_reported_per_completion() {
        let mut seen = Vec::new();
        scatter_ordered(
            vec![1u32, 2, 3],
            2,
            |n| async move { (n, ()) },
            |done, total| seen.push((done, total)),
        )
        .await;

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<(u32, u32)> =
            scatter_ordered(Vec::new(), 4, |n: u32| async move { (n, n) }, |_, _| {}).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_is_dropped_not_fatal() {
        let items: Vec<u32> = vec![1, 2, 3];
        let results = scatter_ordered(
            items,
            2,
            |n| async move {
                if n == 2 {
                    panic!("boom");
                }
                (n, ())
            },
            |_, _| {},
        )
        .await;

        let keys: Vec<u32> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 3]);
    }
}
