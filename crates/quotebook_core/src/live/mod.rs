//! Live sequences: observable state with replay-on-subscribe.
//!
//! # Responsibility
//! - Deliver the current value to a new subscriber, then every later value.
//! - Let each subscriber leave independently (explicitly or on drop).
//!
//! # Invariants
//! - A subscriber never sees values out of publish order.
//! - Unsubscribing never blocks or fails writers or other subscribers.
//! - Subscribers whose receiving side is gone are pruned on next publish.

use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Weak};
use std::time::Duration;

mod value;

pub use value::LiveValue;

/// Identifier of one registration inside a hub.
pub type SubscriptionId = u64;

type Sink<S> = Box<dyn Fn(&S) -> bool + Send>;

struct Entry<Q, S> {
    id: SubscriptionId,
    query: Q,
    sink: Sink<S>,
}

struct Registry<Q, S> {
    next_id: SubscriptionId,
    entries: Vec<Entry<Q, S>>,
}

trait Detach: Send + Sync {
    fn detach(&self, id: SubscriptionId);
}

impl<Q: Send + 'static, S: 'static> Detach for Mutex<Registry<Q, S>> {
    fn detach(&self, id: SubscriptionId) {
        self.lock().entries.retain(|entry| entry.id != id);
    }
}

/// Fan-out point for snapshots of type `S`, keyed by subscriber query `Q`.
///
/// Each subscriber projects the snapshot for its query into its own value
/// type, so one hub can serve raw lists and derived summaries alike.
pub struct LiveHub<Q, S> {
    registry: Arc<Mutex<Registry<Q, S>>>,
}

impl<Q, S> Default for LiveHub<Q, S> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }
}

impl<Q, S> LiveHub<Q, S>
where
    Q: Clone + PartialEq + Send + 'static,
    S: 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber and replays `current` to it right away.
    ///
    /// Callers must hold whatever lock serializes their writes while calling
    /// this, so no publish can slip between the snapshot and registration.
    pub fn subscribe<T, F>(&self, query: Q, current: &S, project: F) -> Subscription<T>
    where
        T: Send + 'static,
        F: Fn(&S) -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<T>();
        let _ = tx.send(project(current));
        let sink: Sink<S> = Box::new(move |snapshot: &S| tx.send(project(snapshot)).is_ok());

        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry { id, query, sink });
        drop(registry);

        let registry: Arc<dyn Detach> = self.registry.clone();
        Subscription {
            id,
            receiver: rx,
            registry: Arc::downgrade(&registry),
        }
    }

    /// Pushes a fresh snapshot to every subscriber.
    ///
    /// `snapshot_for` is evaluated once per distinct query. A query whose
    /// snapshot cannot be produced is skipped; its subscribers keep their last
    /// value. Returns the first such error, if any.
    pub fn publish<E>(&self, mut snapshot_for: impl FnMut(&Q) -> Result<S, E>) -> Result<(), E> {
        let mut registry = self.registry.lock();
        let mut computed: Vec<(Q, Option<S>)> = Vec::new();
        let mut first_error = None;

        registry.entries.retain(|entry| {
            let slot = match computed.iter().position(|(query, _)| *query == entry.query) {
                Some(position) => position,
                None => {
                    let snapshot = match snapshot_for(&entry.query) {
                        Ok(snapshot) => Some(snapshot),
                        Err(err) => {
                            first_error.get_or_insert(err);
                            None
                        }
                    };
                    computed.push((entry.query.clone(), snapshot));
                    computed.len() - 1
                }
            };
            match &computed[slot].1 {
                Some(snapshot) => (entry.sink)(snapshot),
                None => true,
            }
        });

        first_error.map_or(Ok(()), Err)
    }

    /// Number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().entries.len()
    }

    /// Distinct queries that currently have at least one subscriber.
    pub fn active_queries(&self) -> Vec<Q> {
        let registry = self.registry.lock();
        let mut queries: Vec<Q> = Vec::new();
        for entry in &registry.entries {
            if !queries.contains(&entry.query) {
                queries.push(entry.query.clone());
            }
        }
        queries
    }
}

/// Receiving end of a live sequence.
///
/// The first value is always the state at subscription time. Dropping the
/// subscription unsubscribes it.
pub struct Subscription<T> {
    id: SubscriptionId,
    receiver: Receiver<T>,
    registry: Weak<dyn Detach>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Blocks until the next value. `None` once the source is gone.
    pub fn recv(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Waits up to `timeout` for the next value.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(value) => Some(value),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Returns the next pending value without blocking.
    pub fn try_recv(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drains everything pending and returns the newest value, if any.
    pub fn latest(&self) -> Option<T> {
        let mut newest = None;
        while let Some(value) = self.try_recv() {
            newest = Some(value);
        }
        newest
    }

    /// Stops delivery for this subscriber only.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::LiveHub;
    use std::convert::Infallible;

    #[test]
    fn subscriber_receives_replay_then_updates() {
        let hub: LiveHub<(), i32> = LiveHub::new();
        let subscription = hub.subscribe((), &1, |value| *value);
        hub.publish(|_| Ok::<_, Infallible>(2)).unwrap();
        hub.publish(|_| Ok::<_, Infallible>(3)).unwrap();

        assert_eq!(subscription.try_recv(), Some(1));
        assert_eq!(subscription.try_recv(), Some(2));
        assert_eq!(subscription.try_recv(), Some(3));
        assert_eq!(subscription.try_recv(), None);
    }

    #[test]
    fn snapshot_is_computed_once_per_distinct_query() {
        let hub: LiveHub<&'static str, String> = LiveHub::new();
        let _a1 = hub.subscribe("a", &String::new(), |value: &String| value.clone());
        let _a2 = hub.subscribe("a", &String::new(), |value: &String| value.clone());
        let _b = hub.subscribe("b", &String::new(), |value: &String| value.clone());

        let mut calls = Vec::new();
        hub.publish(|query| {
            calls.push(*query);
            Ok::<_, Infallible>(query.to_uppercase())
        })
        .unwrap();
        assert_eq!(calls, vec!["a", "b"]);
    }

    #[test]
    fn dropping_subscription_unregisters_it() {
        let hub: LiveHub<(), i32> = LiveHub::new();
        let first = hub.subscribe((), &0, |value| *value);
        let second = hub.subscribe((), &0, |value| *value);
        assert_eq!(hub.subscriber_count(), 2);

        first.unsubscribe();
        assert_eq!(hub.subscriber_count(), 1);

        hub.publish(|_| Ok::<_, Infallible>(5)).unwrap();
        assert_eq!(second.latest(), Some(5));
    }

    #[test]
    fn failed_snapshot_keeps_previous_value_and_reports_error() {
        let hub: LiveHub<(), i32> = LiveHub::new();
        let subscription = hub.subscribe((), &1, |value| *value);
        let err = hub.publish(|_| Err::<i32, _>("boom")).unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(subscription.latest(), Some(1));
        assert_eq!(hub.subscriber_count(), 1);
    }
}
