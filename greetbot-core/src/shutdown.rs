//! At-most-once shutdown coordination.
//!
//! [`ShutdownLatch`] holds one cleanup action and runs it on the first
//! [`ShutdownLatch::fire`], no matter how many signals arrive or how they
//! interleave. [`spawn_signal_listener`] wires the latch to SIGINT/SIGTERM.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{error, info};

type Cleanup = Pin<Box<dyn Future<Output = ()> + Send>>;

/// At-most-once latch around a cleanup action.
pub struct ShutdownLatch {
    fired: AtomicBool,
    cleanup: Mutex<Option<Cleanup>>,
}

impl ShutdownLatch {
    /// Creates a latch holding the given async teardown action.
    pub fn new<F>(cleanup: F) -> Arc<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Arc::new(Self {
            fired: AtomicBool::new(false),
            cleanup: Mutex::new(Some(Box::pin(cleanup))),
        })
    }

    /// Runs the cleanup action if this is the first call; every later call
    /// returns immediately. Safe under concurrent callers: the
    /// compare-exchange picks exactly one winner.
    pub async fn fire(&self) {
        if self
            .fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        info!("Shutdown initiated");
        let cleanup = match self.cleanup.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(cleanup) = cleanup {
            cleanup.await;
        }
    }

    /// Whether a shutdown has already been triggered.
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Spawns a task that fires the latch on SIGINT or SIGTERM. Duplicate
/// signals are swallowed by the latch. Must be registered before the
/// blocking start call so a signal during startup still triggers cleanup.
pub fn spawn_signal_listener(latch: Arc<ShutdownLatch>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(stream) => Some(stream),
                Err(err) => {
                    error!(
                        error = %err,
                        "Failed to install SIGTERM handler, listening for Ctrl+C only"
                    );
                    None
                }
            };

            loop {
                match sigterm.as_mut() {
                    Some(term) => {
                        tokio::select! {
                            _ = tokio::signal::ctrl_c() => {}
                            _ = term.recv() => {}
                        }
                    }
                    None => {
                        if tokio::signal::ctrl_c().await.is_err() {
                            error!("Failed to wait for Ctrl+C, signal listener exiting");
                            return;
                        }
                    }
                }
                latch.fire().await;
            }
        }

        #[cfg(not(unix))]
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                error!("Failed to wait for Ctrl+C, signal listener exiting");
                return;
            }
            latch.fire().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_fire_runs_cleanup_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let latch = ShutdownLatch::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!latch.is_fired());
        latch.fire().await;
        latch.fire().await;
        latch.fire().await;

        assert!(latch.is_fired());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_fire_storm_runs_cleanup_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let latch = ShutdownLatch::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut tasks = Vec::new();
        for _ in 0..32 {
            let latch = latch.clone();
            tasks.push(tokio::spawn(async move { latch.fire().await }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fire_awaits_cleanup_completion() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        let latch = ShutdownLatch::new(async move {
            let _ = rx.await;
            flag.store(true, Ordering::SeqCst);
        });

        let fire = {
            let latch = latch.clone();
            tokio::spawn(async move { latch.fire().await })
        };
        tx.send(()).unwrap();
        fire.await.unwrap();

        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_second_fire_returns_without_waiting() {
        // Cleanup that would block forever if awaited twice.
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let latch = ShutdownLatch::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        latch.fire().await;
        // Second call must complete immediately even though the cleanup
        // slot is now empty.
        latch.fire().await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
