//! Per-facet long-poll loop with reference-counted activation

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use bluos_channel::{ChangeToken, LongPoll, LongPollable};

use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::source::PollSource;
use crate::subscription::{FacetEvent, FacetSubscription};

/// Detach hook handed to subscriptions, erased over the source type
pub(crate) trait HostControl: Send + Sync {
    fn release(&self, id: u64);
}

/// Owns one facet: its poll loop, its subscribers, and its failure state
///
/// The loop is started when the first subscriber attaches and stopped when
/// the last one detaches; stopping cancels the in-flight long-poll by
/// dropping its future. At most one loop (and therefore at most one
/// outstanding request) exists per host at any time.
pub struct FacetHost<S: PollSource> {
    source: S,
    config: StreamConfig,
    registry: Mutex<Registry<S::Snapshot>>,
}

struct Registry<T> {
    subscribers: Vec<Subscriber<T>>,
    next_subscriber_id: u64,
    /// Latest publication, replayed to newly attached subscribers
    latest: Option<FacetEvent<T>>,
    /// Set once the retry budget is exhausted; cleared by `reactivate`
    failed: bool,
    /// Present while a loop is running for this host
    loop_handle: Option<LoopHandle>,
}

struct Subscriber<T> {
    id: u64,
    tx: mpsc::UnboundedSender<FacetEvent<T>>,
}

struct LoopHandle {
    shutdown: watch::Sender<bool>,
}

impl<S: PollSource> FacetHost<S> {
    pub fn new(source: S, config: StreamConfig) -> Arc<Self> {
        Arc::new(Self {
            source,
            config,
            registry: Mutex::new(Registry {
                subscribers: Vec::new(),
                next_subscriber_id: 0,
                latest: None,
                failed: false,
                loop_handle: None,
            }),
        })
    }

    /// Attach a subscriber, activating the poll loop if it is the first
    ///
    /// The latest publication (snapshot or terminal failure) is replayed
    /// to the new subscriber immediately. While the host is in the failed
    /// state no loop is started; the subscriber receives the failure and
    /// the host waits for [`FacetHost::reactivate`].
    pub fn attach(self: &Arc<Self>) -> FacetSubscription<S::Snapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.registry.lock();

        let id = registry.next_subscriber_id;
        registry.next_subscriber_id += 1;

        if let Some(latest) = registry.latest.clone() {
            let _ = tx.send(latest);
        }
        registry.subscribers.push(Subscriber { id, tx });
        tracing::debug!(
            facet = self.source.facet(),
            subscribers = registry.subscribers.len(),
            "subscriber attached"
        );

        if registry.loop_handle.is_none() && !registry.failed {
            self.spawn_loop(&mut registry);
        }
        drop(registry);

        FacetSubscription::new(id, rx, Arc::clone(self) as Arc<dyn HostControl>)
    }

    /// Clear a terminal failure and restart the loop if subscribers remain
    ///
    /// A no-op unless the host is in the failed state.
    pub fn reactivate(self: &Arc<Self>) {
        let mut registry = self.registry.lock();
        if !registry.failed {
            return;
        }
        registry.failed = false;
        registry.latest = None;
        tracing::info!(facet = self.source.facet(), "facet stream reactivated");
        if !registry.subscribers.is_empty() {
            self.spawn_loop(&mut registry);
        }
    }

    /// Number of currently attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }

    /// Whether the host is in the terminal failed state
    pub fn is_failed(&self) -> bool {
        self.registry.lock().failed
    }

    /// Whether a poll loop is currently running
    pub fn is_active(&self) -> bool {
        self.registry.lock().loop_handle.is_some()
    }

    fn spawn_loop(self: &Arc<Self>, registry: &mut Registry<S::Snapshot>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        registry.loop_handle = Some(LoopHandle {
            shutdown: shutdown_tx,
        });
        let host = Arc::clone(self);
        tokio::spawn(async move { host.run(shutdown_rx).await });
        tracing::debug!(facet = self.source.facet(), "long-poll loop started");
    }

    async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let facet = self.source.facet();

        // Seed the comparison value from the last publication so a restart
        // does not re-emit an unchanged snapshot.
        let mut last: Option<S::Snapshot> = match self.registry.lock().latest.clone() {
            Some(FacetEvent::Snapshot(snapshot)) => Some(snapshot),
            _ => None,
        };
        let mut token: Option<ChangeToken> = None;
        let mut failures: u32 = 0;

        loop {
            let poll = token
                .clone()
                .map(|token| LongPoll::new(token, self.config.poll_timeout));

            let result = tokio::select! {
                _ = shutdown.changed() => break,
                result = self.source.poll(poll.as_ref()) => result,
            };

            match result {
                Ok(snapshot) => {
                    failures = 0;
                    token = snapshot.change_token();
                    let changed = match &last {
                        Some(previous) => !previous.content_eq(&snapshot),
                        None => true,
                    };
                    if changed {
                        tracing::debug!(facet, "publishing changed snapshot");
                        last = Some(snapshot.clone());
                        self.publish(FacetEvent::Snapshot(snapshot));
                    }
                }
                Err(error) => {
                    failures += 1;
                    if failures >= self.config.max_failures || !error.is_retryable() {
                        tracing::warn!(
                            facet,
                            failures,
                            %error,
                            "facet stream is now unavailable"
                        );
                        self.fail(StreamError::Unavailable {
                            facet,
                            failures,
                            source: error,
                        });
                        return;
                    }
                    let delay = self.config.backoff_delay(failures);
                    tracing::debug!(facet, failures, ?delay, %error, "poll failed, backing off");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
        tracing::debug!(facet, "long-poll loop stopped");
    }

    fn publish(&self, event: FacetEvent<S::Snapshot>) {
        let mut registry = self.registry.lock();
        registry.latest = Some(event.clone());
        registry
            .subscribers
            .retain(|subscriber| subscriber.tx.send(event.clone()).is_ok());
    }

    fn fail(&self, error: StreamError) {
        let mut registry = self.registry.lock();
        registry.failed = true;
        registry.loop_handle = None;
        let event = FacetEvent::Unavailable(Arc::new(error));
        registry.latest = Some(event.clone());
        registry
            .subscribers
            .retain(|subscriber| subscriber.tx.send(event.clone()).is_ok());
    }
}

impl<S: PollSource> HostControl for FacetHost<S> {
    fn release(&self, id: u64) {
        let mut registry = self.registry.lock();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|subscriber| subscriber.id != id);
        if registry.subscribers.len() == before {
            return;
        }
        tracing::debug!(
            facet = self.source.facet(),
            subscribers = registry.subscribers.len(),
            "subscriber detached"
        );
        if registry.subscribers.is_empty() {
            // Dropping the shutdown sender wakes the loop out of its
            // in-flight poll or backoff sleep.
            if let Some(handle) = registry.loop_handle.take() {
                let _ = handle.shutdown.send(true);
                tracing::debug!(
                    facet = self.source.facet(),
                    "last subscriber detached, stopping long-poll loop"
                );
            }
        }
    }
}
