//! Polling scheduler.
//!
//! Drives a status source on a fixed interval and forwards each cycle's
//! outcome to the consumer via a channel. The poller owns the cadence and
//! the overlap policy; sources only know how to perform one fetch.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::data::StatusDocument;
use crate::source::StatusSource;

/// Outcome of one polling cycle.
///
/// Cycle numbers increase monotonically from 1, so a consumer can always
/// tell which cycle an update belongs to.
#[derive(Debug, Clone)]
pub enum PollUpdate {
    /// The cycle fetched and decoded a status document.
    Document {
        cycle: u64,
        document: StatusDocument,
    },
    /// The cycle failed (transport or decode); the document is unchanged.
    Failed { cycle: u64, error: String },
}

/// Caller-owned handle for a running poller.
///
/// Dropping the handle does not stop polling; call [`PollerHandle::stop`]
/// to tear the task down.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the polling task.
    pub fn stop(self) {
        self.task.abort();
    }

    /// Whether the polling task has exited on its own (receiver dropped).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Repeating poller over a status source.
pub struct Poller;

impl Poller {
    /// Spawn a polling task over the given source.
    ///
    /// The first fetch happens after one full interval, never immediately.
    /// Each cycle fetches once and sends the outcome on the returned
    /// channel; fetch failures are logged and forwarded, and never stop
    /// the loop.
    ///
    /// At most one request is outstanding at any time: the fetch is awaited
    /// inside the tick loop and missed ticks are skipped, so a slow cycle
    /// delays the next one rather than overlapping it. Outcomes therefore
    /// always arrive in cycle order.
    ///
    /// The task exits when the receiver is dropped, or when the returned
    /// handle is stopped.
    pub fn spawn(
        source: Box<dyn StatusSource>,
        interval: Duration,
    ) -> (PollerHandle, mpsc::Receiver<PollUpdate>) {
        let (tx, rx) = mpsc::channel(16);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut cycle: u64 = 0;
            loop {
                ticker.tick().await;
                cycle += 1;

                let update = match source.fetch().await {
                    Ok(document) => {
                        debug!("cycle {}: {} groups", cycle, document.len());
                        PollUpdate::Document { cycle, document }
                    }
                    Err(e) => {
                        let error = format!("{:#}", e);
                        error!("cycle {} failed: {}", cycle, error);
                        PollUpdate::Failed { cycle, error }
                    }
                };

                if tx.send(update).await.is_err() {
                    // Receiver dropped, exit
                    break;
                }
            }
        });

        (PollerHandle { task }, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::{bail, Result};
    use async_trait::async_trait;

    /// Source that counts fetches and returns a fixed document.
    #[derive(Debug)]
    struct CountingSource {
        count: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
            let count = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    count: count.clone(),
                    fail,
                },
                count,
            )
        }
    }

    #[async_trait]
    impl StatusSource for CountingSource {
        async fn fetch(&self) -> Result<StatusDocument> {
            self.count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("simulated transport failure");
            }
            serde_json::from_str(r#"{"AMC1": {"temp_elem": {"class_name": "ok", "value": 42}}}"#)
                .map_err(Into::into)
        }

        fn description(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_no_fetch_before_first_interval() {
        let (source, count) = CountingSource::new(false);
        let (handle, _rx) = Poller::spawn(Box::new(source), Duration::from_millis(200));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        handle.stop();
    }

    #[tokio::test]
    async fn test_fetches_repeat_on_interval() {
        let (source, count) = CountingSource::new(false);
        let (handle, mut rx) = Poller::spawn(Box::new(source), Duration::from_millis(50));

        // Keep the channel drained so the loop never blocks on send
        let drain = tokio::spawn(async move { while rx.recv().await.is_some() {} });

        tokio::time::sleep(Duration::from_millis(320)).await;
        let fetched = count.load(Ordering::SeqCst);
        assert!(fetched >= 3, "expected at least 3 fetches, got {}", fetched);

        handle.stop();
        drain.abort();
    }

    #[tokio::test]
    async fn test_stop_halts_polling() {
        let (source, count) = CountingSource::new(false);
        let (handle, mut rx) = Poller::spawn(Box::new(source), Duration::from_millis(30));

        let drain = tokio::spawn(async move { while rx.recv().await.is_some() {} });

        tokio::time::sleep(Duration::from_millis(120)).await;
        handle.stop();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let after_stop = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);

        drain.abort();
    }

    #[tokio::test]
    async fn test_failure_keeps_polling() {
        let (source, _count) = CountingSource::new(true);
        let (handle, mut rx) = Poller::spawn(Box::new(source), Duration::from_millis(20));

        // Two consecutive failed cycles still arrive, in order
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();

        match (first, second) {
            (
                PollUpdate::Failed { cycle: c1, error },
                PollUpdate::Failed { cycle: c2, .. },
            ) => {
                assert_eq!(c1, 1);
                assert_eq!(c2, 2);
                assert!(error.contains("simulated transport failure"));
            }
            other => panic!("expected two failures, got {:?}", other),
        }

        handle.stop();
    }

    #[tokio::test]
    async fn test_document_update_carries_cycle() {
        let (source, _count) = CountingSource::new(false);
        let (handle, mut rx) = Poller::spawn(Box::new(source), Duration::from_millis(20));

        match rx.recv().await.unwrap() {
            PollUpdate::Document { cycle, document } => {
                assert_eq!(cycle, 1);
                assert!(document.contains_key("AMC1"));
            }
            other => panic!("expected document, got {:?}", other),
        }

        handle.stop();
    }

    #[tokio::test]
    async fn test_task_exits_when_receiver_dropped() {
        let (source, _count) = CountingSource::new(false);
        let (handle, rx) = Poller::spawn(Box::new(source), Duration::from_millis(20));
        drop(rx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
