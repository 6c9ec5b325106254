/**
 * Change Relay Runner
 *
 * `ChangeRelay` opens one change subscription per rule and runs each as its
 * own tokio task. A task consumes its stream one event at a time: an insert
 * is projected and published before the next event is pulled, anything else
 * is logged and dropped.
 *
 * # Failure Handling
 *
 * A feed error, a closed feed, an insert without a document or a failed
 * publish ends that subscription's task. The reason is reported on the
 * handle's failure channel; the other subscriptions keep running. Nothing
 * is retried and nothing resubscribes; restarting is up to whoever owns
 * the handle.
 */

use futures_util::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::rules::{RelayRule, DEFAULT_RULES};
use crate::backend::realtime::{BroadcastSink, SinkError};
use crate::backend::store::{ChangeFeed, ChangeStream, StoreError};
use crate::shared::{Collection, OperationType};

/// Reasons a relay subscription stops
#[derive(Debug, Error)]
pub enum RelayError {
    /// The subscription could not be opened
    #[error("Failed to subscribe to {collection}: {source}")]
    Subscribe {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    /// The change feed yielded an error
    #[error("Change feed for {collection} failed: {source}")]
    Feed {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    /// The change feed ended
    #[error("Change feed for {collection} closed")]
    FeedClosed { collection: Collection },

    /// An insert event arrived without its document
    #[error("Insert event on {collection} carried no document")]
    MissingDocument { collection: Collection },

    /// The broadcast sink refused or failed a publish
    #[error("Publishing {channel}:{event} for {collection} failed: {source}")]
    Publish {
        collection: Collection,
        channel: &'static str,
        event: &'static str,
        #[source]
        source: SinkError,
    },
}

impl RelayError {
    /// Collection whose subscription stopped
    pub fn collection(&self) -> Collection {
        match self {
            RelayError::Subscribe { collection, .. }
            | RelayError::Feed { collection, .. }
            | RelayError::FeedClosed { collection }
            | RelayError::MissingDocument { collection }
            | RelayError::Publish { collection, .. } => *collection,
        }
    }
}

/// Consume `events` under `rule` until the subscription fails
///
/// Returns the reason the subscription stopped.
pub async fn forward(
    rule: &RelayRule,
    mut events: ChangeStream,
    sink: &dyn BroadcastSink,
) -> RelayError {
    let collection = rule.collection;

    while let Some(item) = events.next().await {
        let event = match item {
            Ok(event) => event,
            Err(source) => return RelayError::Feed { collection, source },
        };

        if event.operation_type != OperationType::Insert {
            tracing::debug!(
                %collection,
                kind = %event.operation_type,
                "Ignoring non-insert change event"
            );
            continue;
        }

        let Some(document) = event.full_document else {
            return RelayError::MissingDocument { collection };
        };

        let payload = rule.project(&document);
        if let Err(source) = sink.publish(rule.channel, rule.event, payload).await {
            return RelayError::Publish {
                collection,
                channel: rule.channel,
                event: rule.event,
                source,
            };
        }

        tracing::debug!(%collection, "Relayed {}:{}", rule.channel, rule.event);
    }

    RelayError::FeedClosed { collection }
}

/// Database-change relay
///
/// Built once at startup; `start` consumes it and hands back the handle that
/// owns the running subscriptions.
pub struct ChangeRelay {
    feed: Arc<dyn ChangeFeed>,
    sink: Arc<dyn BroadcastSink>,
    rules: Vec<RelayRule>,
}

impl ChangeRelay {
    /// Relay with the default message and room rules
    pub fn new(feed: Arc<dyn ChangeFeed>, sink: Arc<dyn BroadcastSink>) -> Self {
        Self::with_rules(feed, sink, DEFAULT_RULES.to_vec())
    }

    pub fn with_rules(
        feed: Arc<dyn ChangeFeed>,
        sink: Arc<dyn BroadcastSink>,
        rules: Vec<RelayRule>,
    ) -> Self {
        Self { feed, sink, rules }
    }

    pub fn rules(&self) -> &[RelayRule] {
        &self.rules
    }

    /// Open every subscription, then spawn one forwarding task per rule
    ///
    /// All subscriptions are established before any task starts, so a
    /// failure here leaves nothing running.
    pub async fn start(self) -> Result<RelayHandle, RelayError> {
        let mut streams = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let stream = self
                .feed
                .subscribe(rule.collection)
                .await
                .map_err(|source| RelayError::Subscribe {
                    collection: rule.collection,
                    source,
                })?;
            streams.push((*rule, stream));
        }

        let (failures_tx, failures) = mpsc::unbounded_channel();
        let mut tasks = Vec::with_capacity(streams.len());

        for (rule, stream) in streams {
            let sink = self.sink.clone();
            let failures_tx = failures_tx.clone();

            let task = tokio::spawn(async move {
                let error = forward(&rule, stream, sink.as_ref()).await;
                tracing::error!(collection = %rule.collection, "Change relay stopped: {}", error);
                // Receiver gone means the handle was dropped; nothing left to tell
                let _ = failures_tx.send(error);
            });

            tracing::info!(collection = %rule.collection, "Change relay started");
            tasks.push((rule.collection, task));
        }

        Ok(RelayHandle { tasks, failures })
    }
}

/// Running relay subscriptions
#[derive(Debug)]
pub struct RelayHandle {
    tasks: Vec<(Collection, JoinHandle<()>)>,
    failures: mpsc::UnboundedReceiver<RelayError>,
}

impl RelayHandle {
    /// Wait for the next subscription failure
    ///
    /// Returns `None` once every subscription has stopped and all failures
    /// have been taken.
    pub async fn failed(&mut self) -> Option<RelayError> {
        self.failures.recv().await
    }

    /// Whether the subscription for `collection` is still running
    pub fn is_running(&self, collection: Collection) -> bool {
        self.tasks
            .iter()
            .any(|(c, task)| *c == collection && !task.is_finished())
    }

    /// Abort every subscription and wait for the tasks to wind down
    pub async fn stop(self) {
        for (collection, task) in self.tasks {
            task.abort();
            // Cancellation is the expected outcome here
            let _ = task.await;
            tracing::info!(%collection, "Change relay stopped");
        }
    }
}
