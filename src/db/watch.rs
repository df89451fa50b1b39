//! In-process change notifications plus cross-process change polling.
//!
//! Every committed mutation in the core layer publishes a [`ChangeEvent`]
//! to the pool's [`ChangeFeed`]. Subscribers get their own mpsc channel
//! and simply drop the [`WatchHandle`] to unsubscribe; dead channels are
//! pruned on the next emit. Changes made by other processes do not pass
//! through the feed and are picked up by polling `PRAGMA data_version`
//! (see [`DbPool::data_version`](crate::db::pool::DbPool::data_version)).

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Which table a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Trip,
    DayInfo,
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

/// One committed mutation, as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub entity: Entity,
    pub op: ChangeOp,
    pub trip_id: i64,
    /// Day the change touched, when the mutation is day-scoped.
    pub day: Option<i64>,
}

impl ChangeEvent {
    pub fn new(entity: Entity, op: ChangeOp, trip_id: i64) -> Self {
        ChangeEvent {
            entity,
            op,
            trip_id,
            day: None,
        }
    }

    pub fn on_day(mut self, day: i64) -> Self {
        self.day = Some(day);
        self
    }
}

/// Fan-out registry of live subscriptions.
pub struct ChangeFeed {
    subscribers: Mutex<Vec<Sender<ChangeEvent>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        ChangeFeed {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a subscriber. The returned handle receives every event
    /// emitted after this call; dropping it tears the subscription down.
    pub fn subscribe(&self) -> WatchHandle {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        WatchHandle { rx }
    }

    /// Deliver an event to all live subscribers, dropping the ones whose
    /// receiving end is gone.
    pub fn emit(&self, event: ChangeEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a subscription. Cancellation is dropping the handle.
pub struct WatchHandle {
    rx: Receiver<ChangeEvent>,
}

impl WatchHandle {
    pub fn try_recv(&self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<ChangeEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Drain everything queued so far.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            out.push(ev);
        }
        out
    }

    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_event() {
        let feed = ChangeFeed::new();
        let a = feed.subscribe();
        let b = feed.subscribe();

        feed.emit(ChangeEvent::new(Entity::Trip, ChangeOp::Created, 1));
        feed.emit(ChangeEvent::new(Entity::Schedule, ChangeOp::Updated, 1).on_day(2));

        for rx in [&a, &b] {
            let got = rx.drain();
            assert_eq!(got.len(), 2);
            assert_eq!(got[0].entity, Entity::Trip);
            assert_eq!(got[1].day, Some(2));
        }
    }

    #[test]
    fn dropped_handles_are_pruned_on_emit() {
        let feed = ChangeFeed::new();
        let a = feed.subscribe();
        let b = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 2);

        b.cancel();
        feed.emit(ChangeEvent::new(Entity::Trip, ChangeOp::Deleted, 7));
        assert_eq!(feed.subscriber_count(), 1);
        assert_eq!(a.drain().len(), 1);
    }

    #[test]
    fn events_before_subscribe_are_not_replayed() {
        let feed = ChangeFeed::new();
        feed.emit(ChangeEvent::new(Entity::DayInfo, ChangeOp::Created, 1));
        let late = feed.subscribe();
        assert!(late.try_recv().is_none());
    }
}
