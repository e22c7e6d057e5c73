//! Cancellable status polling.
//!
//! A single polling primitive shared by every surface that watches an
//! asynchronous process: it repeatedly invokes a caller-supplied fetch,
//! forwards snapshots over a channel, stops on its own when the watched
//! process reaches a terminal state, and always stops when the handle is
//! cancelled or dropped.

use atrium_core::config::PollerConfig;
use atrium_core::error::Result;
use std::future::Future;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One observation delivered to the poll subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent<T> {
    /// A non-terminal snapshot of the watched state.
    Snapshot(T),
    /// The poll target has failed `consecutive_failures` times in a row.
    /// Polling continues at a backed-off interval; emitted once per
    /// degradation episode.
    Degraded { consecutive_failures: u32 },
    /// The watched state is terminal. Always the last event.
    Terminal(T),
}

/// Spawns polling loops according to a [`PollerConfig`].
#[derive(Debug, Clone, Default)]
pub struct StatusPoller {
    config: PollerConfig,
}

impl StatusPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    /// Starts polling `fetch` on the configured interval.
    ///
    /// The loop sleeps first, so the initial observation lands one
    /// interval after the spawn. It ends when `is_terminal` accepts a
    /// snapshot, when the handle is cancelled or dropped, or when the
    /// subscriber stops listening. After cancellation no further fetch is
    /// issued.
    ///
    /// Fetch errors never end the loop: after `failure_threshold`
    /// consecutive failures a single [`PollEvent::Degraded`] is emitted
    /// and the interval backs off (capped); one success restores the
    /// configured interval.
    pub fn spawn<T, F, Fut, P>(&self, fetch: F, is_terminal: P) -> PollHandle<T>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send,
        P: Fn(&T) -> bool + Send + 'static,
    {
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        let config = self.config.clone();

        tokio::spawn(async move {
            let mut interval = config.interval();
            let mut consecutive_failures: u32 = 0;

            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => {
                        tracing::debug!(target: "poller", "polling cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }

                match fetch().await {
                    Ok(snapshot) => {
                        if consecutive_failures >= config.failure_threshold {
                            tracing::info!(
                                target: "poller",
                                consecutive_failures,
                                "poll target recovered"
                            );
                        }
                        consecutive_failures = 0;
                        interval = config.interval();

                        if is_terminal(&snapshot) {
                            let _ = tx.send(PollEvent::Terminal(snapshot));
                            break;
                        }
                        if tx.send(PollEvent::Snapshot(snapshot)).is_err() {
                            // Subscriber went away
                            break;
                        }
                    }
                    Err(e) => {
                        consecutive_failures += 1;
                        tracing::warn!(
                            target: "poller",
                            consecutive_failures,
                            "poll fetch failed: {}",
                            e
                        );
                        if consecutive_failures == config.failure_threshold
                            && tx
                                .send(PollEvent::Degraded {
                                    consecutive_failures,
                                })
                                .is_err()
                        {
                            break;
                        }
                        if consecutive_failures >= config.failure_threshold {
                            interval = config.backed_off(interval);
                        }
                    }
                }
            }
        });

        PollHandle { events: rx, token }
    }
}

/// Subscription to a running polling loop.
///
/// Dropping the handle cancels the loop, so a poll never outlives the
/// scope that asked for it.
pub struct PollHandle<T> {
    events: mpsc::UnboundedReceiver<PollEvent<T>>,
    token: CancellationToken,
}

impl<T> PollHandle<T> {
    /// Receives the next event; `None` once the loop has ended.
    pub async fn recv(&mut self) -> Option<PollEvent<T>> {
        self.events.recv().await
    }

    /// Stops the loop. No further fetch is issued after this returns,
    /// beyond one already in flight.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
