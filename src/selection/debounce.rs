use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds at most one deferred task. Scheduling a new one aborts whatever
/// was still waiting.
///
/// Aborting cannot stop a task that already woke up on another worker, so
/// each task also carries the generation it was scheduled in and only runs
/// while that generation is current. The check and the run happen under
/// the generation lock: once `cancel` or `schedule` returns, no older task
/// can start.
pub struct DebouncedTask {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    generation: Arc<Mutex<u64>>,
}

impl DebouncedTask {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
            generation: Arc::new(Mutex::new(0)),
        }
    }

    fn next_generation(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let mine = self.next_generation();
        let generation = Arc::clone(&self.generation);
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                log::trace!("debounce: superseding pending task");
            }
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let current = generation.lock();
            if *current == mine {
                task();
            } else {
                log::trace!("debounce: dropping stale task {mine}");
            }
        }));
    }

    pub fn cancel(&self) {
        self.next_generation();
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for DebouncedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn burst_runs_only_last_task() {
        let debounce = DebouncedTask::new(Duration::from_millis(10));
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for i in 1..=3 {
            let runs = Arc::clone(&runs);
            let last = Arc::clone(&last);
            debounce.schedule(move || {
                runs.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(3)).await;
        }
        assert!(debounce.is_pending());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_all_run() {
        let debounce = DebouncedTask::new(Duration::from_millis(10));
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let runs = Arc::clone(&runs);
            debounce.schedule(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(15)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_generation_never_runs() {
        let debounce = DebouncedTask::new(Duration::from_millis(10));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        debounce.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        // a task that is past its sleep can no longer be aborted; bumping the
        // generation alone must keep it from running
        debounce.next_generation();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_task() {
        let debounce = DebouncedTask::new(Duration::from_millis(10));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        debounce.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debounce.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
