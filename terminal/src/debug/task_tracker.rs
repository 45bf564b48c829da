//! Async task lifecycle tracking for quote timers and fetches

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Tasks spawned but not yet finished
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);

/// Monotonic id for log correlation
static TASK_IDS: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Decrements the active count even when the task is aborted mid-flight
struct ActiveGuard;

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Arguments
///
/// * `name` - Task name for logging (e.g., "quote_debounce", "quote_fetch")
/// * `future` - The async task to execute
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo() {
/// use swap_terminal::debug::spawn_tracked;
///
/// let handle = spawn_tracked("quote_debounce", async move {
///     tokio::time::sleep(std::time::Duration::from_millis(500)).await;
/// });
/// handle.abort();
/// # }
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = TASK_IDS.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::trace!(task = %name, task_id = task_id, "Task spawned");

    tokio::spawn(async move {
        let _active = ActiveGuard;
        let result = future.await;
        let duration = start.elapsed();

        tracing::trace!(
            task = %name,
            task_id = task_id,
            duration_ms = duration.as_millis() as u64,
            "Task completed"
        );

        // Warn about long-running tasks
        if duration.as_secs() > 30 {
            tracing::warn!(
                task = %name,
                task_id = task_id,
                duration_ms = duration.as_millis() as u64,
                "Task took very long (potential hang)"
            );
        }

        result
    })
}
