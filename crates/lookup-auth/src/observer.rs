//! Subscription capability for authentication state changes.
//!
//! Consumers never read a global token. They are handed an [`AuthObserver`]
//! and register a callback; the observer invokes it with an [`AuthEvent`]
//! whenever the state changes. [`AuthBroadcaster`] is the in-process
//! implementation: whoever owns the auth flow publishes, lookups subscribe.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::event::AuthEvent;

/// Callback invoked with every authentication state change.
pub type AuthCallback = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Opaque token returned by [`AuthObserver::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

/// Something that reports authentication state changes to subscribers.
pub trait AuthObserver: Send + Sync {
    /// Register `callback`. Implementations deliver the current state to the
    /// new subscriber immediately if one is known.
    fn subscribe(&self, callback: AuthCallback) -> SubscriptionHandle;

    /// Stop delivering events to `handle`. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    sequence: u64,
    callbacks: BTreeMap<SubscriptionHandle, Arc<Subscriber>>,
    latest: Option<(u64, AuthEvent)>,
}

/// One registered callback plus its delivery bookkeeping.
///
/// Events carry the sequence number assigned at publish time. A subscriber
/// only ever moves forward: an event older than the last one delivered is
/// dropped, and an event arriving while the callback runs is parked and
/// delivered once it returns.
struct Subscriber {
    callback: AuthCallback,
    delivery: Mutex<Delivery>,
}

#[derive(Default)]
struct Delivery {
    delivered: u64,
    running: bool,
    pending: Option<(u64, AuthEvent)>,
}

impl Subscriber {
    fn new(callback: AuthCallback) -> Self {
        Self {
            callback,
            delivery: Mutex::new(Delivery::default()),
        }
    }

    fn deliver(&self, sequence: u64, event: AuthEvent) {
        let mut state = lock(&self.delivery);
        let superseded = state
            .pending
            .as_ref()
            .is_some_and(|(parked, _)| *parked >= sequence);
        if sequence <= state.delivered || superseded {
            return;
        }
        if state.running {
            state.pending = Some((sequence, event));
            return;
        }
        state.running = true;

        let (mut sequence, mut event) = (sequence, event);
        loop {
            drop(state);
            (self.callback)(&event);
            state = lock(&self.delivery);
            state.delivered = sequence;
            match state.pending.take() {
                Some((next, parked)) if next > sequence => {
                    sequence = next;
                    event = parked;
                }
                _ => {
                    state.running = false;
                    return;
                }
            }
        }
    }
}

/// In-process [`AuthObserver`] that fans published events out to subscribers.
///
/// Every subscriber sees events in publish order and always ends on the
/// latest one, even when publishes race each other or a new subscription.
#[derive(Default)]
pub struct AuthBroadcaster {
    inner: Mutex<Subscribers>,
}

impl AuthBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `event` as the current state and deliver it to every subscriber.
    ///
    /// Callbacks run on the caller's thread, outside the subscriber lock. A
    /// publish from inside a callback is delivered to that subscriber after
    /// the callback returns.
    pub fn publish(&self, event: AuthEvent) {
        let (sequence, subscribers) = {
            let mut inner = self.lock();
            inner.sequence += 1;
            let sequence = inner.sequence;
            inner.latest = Some((sequence, event.clone()));
            let subscribers: Vec<Arc<Subscriber>> = inner.callbacks.values().cloned().collect();
            (sequence, subscribers)
        };

        tracing::debug!(
            state = %event.state,
            sequence,
            subscribers = subscribers.len(),
            "publishing auth state change"
        );
        for subscriber in subscribers {
            subscriber.deliver(sequence, event.clone());
        }
    }

    /// Most recently published event.
    #[must_use]
    pub fn latest(&self) -> Option<AuthEvent> {
        self.lock().latest.as_ref().map(|(_, event)| event.clone())
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().callbacks.len()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        lock(&self.inner)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AuthObserver for AuthBroadcaster {
    fn subscribe(&self, callback: AuthCallback) -> SubscriptionHandle {
        let subscriber = Arc::new(Subscriber::new(callback));
        let (handle, latest) = {
            let mut inner = self.lock();
            let handle = SubscriptionHandle(inner.next_id);
            inner.next_id += 1;
            inner.callbacks.insert(handle, Arc::clone(&subscriber));
            (handle, inner.latest.clone())
        };

        if let Some((sequence, event)) = latest {
            subscriber.deliver(sequence, event);
        }
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        if self.lock().callbacks.remove(&handle).is_none() {
            tracing::debug!(?handle, "unsubscribe for unknown handle ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::{AuthState, AuthToken};

    fn recorder() -> (AuthCallback, Arc<Mutex<Vec<AuthState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: AuthCallback = Arc::new(move |event: &AuthEvent| {
            sink.lock().unwrap().push(event.state);
        });
        (callback, seen)
    }

    #[test]
    fn subscribers_receive_published_events() {
        let broadcaster = AuthBroadcaster::new();
        let (callback, seen) = recorder();
        broadcaster.subscribe(callback);

        broadcaster.publish(AuthEvent::authenticated(AuthToken::new("t"), None));
        broadcaster.publish(AuthEvent::unauthenticated());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![AuthState::Authenticated, AuthState::Unauthenticated]
        );
    }

    #[test]
    fn late_subscriber_gets_latest_event_replayed() {
        let broadcaster = AuthBroadcaster::new();
        broadcaster.publish(AuthEvent::failed("first"));
        broadcaster.publish(AuthEvent::authenticated(AuthToken::new("t"), None));

        let (callback, seen) = recorder();
        broadcaster.subscribe(callback);

        assert_eq!(*seen.lock().unwrap(), vec![AuthState::Authenticated]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let broadcaster = AuthBroadcaster::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle = broadcaster.subscribe(Arc::new(move |_: &AuthEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        broadcaster.publish(AuthEvent::unauthenticated());
        broadcaster.unsubscribe(handle);
        broadcaster.publish(AuthEvent::unauthenticated());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn handles_are_unique() {
        let broadcaster = AuthBroadcaster::new();
        let (a, _) = recorder();
        let (b, _) = recorder();
        assert_ne!(broadcaster.subscribe(a), broadcaster.subscribe(b));
        assert_eq!(broadcaster.subscriber_count(), 2);
    }

    #[test]
    fn callback_may_reenter_broadcaster() {
        let broadcaster = Arc::new(AuthBroadcaster::new());
        let inner = Arc::clone(&broadcaster);
        broadcaster.subscribe(Arc::new(move |_: &AuthEvent| {
            let _ = inner.latest();
        }));
        broadcaster.publish(AuthEvent::unauthenticated());
        assert_eq!(
            broadcaster.latest().map(|e| e.state),
            Some(AuthState::Unauthenticated)
        );
    }

    #[test]
    fn publish_during_replay_leaves_subscriber_on_newest_event() {
        let broadcaster = Arc::new(AuthBroadcaster::new());
        broadcaster.publish(AuthEvent::unauthenticated());

        let (record, seen) = recorder();
        let publisher = Arc::clone(&broadcaster);
        let fired = Arc::new(AtomicBool::new(false));
        broadcaster.subscribe(Arc::new(move |event: &AuthEvent| {
            record(event);
            if !fired.swap(true, Ordering::SeqCst) {
                let publisher = Arc::clone(&publisher);
                std::thread::spawn(move || {
                    publisher.publish(AuthEvent::authenticated(AuthToken::new("fresh"), None));
                })
                .join()
                .unwrap();
            }
        }));

        assert_eq!(
            broadcaster.latest().map(|e| e.state),
            Some(AuthState::Authenticated)
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![AuthState::Unauthenticated, AuthState::Authenticated]
        );
    }

    #[test]
    fn reentrant_publish_is_delivered_after_callback_returns() {
        let broadcaster = Arc::new(AuthBroadcaster::new());
        let (record, seen) = recorder();
        let publisher = Arc::clone(&broadcaster);
        broadcaster.subscribe(Arc::new(move |event: &AuthEvent| {
            record(event);
            if event.state == AuthState::Expired {
                publisher.publish(AuthEvent::unauthenticated());
            }
        }));

        broadcaster.publish(AuthEvent::expired());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![AuthState::Expired, AuthState::Unauthenticated]
        );
    }

    #[test]
    fn concurrent_publishers_leave_every_subscriber_on_latest() {
        let broadcaster = Arc::new(AuthBroadcaster::new());
        let last = Arc::new(Mutex::new(None::<Option<String>>));
        let sink = Arc::clone(&last);
        broadcaster.subscribe(Arc::new(move |event: &AuthEvent| {
            *sink.lock().unwrap() = Some(event.authorization_header());
        }));

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let broadcaster = Arc::clone(&broadcaster);
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let token = AuthToken::new(format!("w{worker}-r{round}"));
                        broadcaster.publish(AuthEvent::authenticated(token, None));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let latest = broadcaster.latest().and_then(|e| e.authorization_header());
        assert_eq!(last.lock().unwrap().clone(), Some(latest));
    }

    #[test]
    fn stale_sequence_is_not_delivered() {
        let (record, seen) = recorder();
        let subscriber = Subscriber::new(record);
        subscriber.deliver(2, AuthEvent::authenticated(AuthToken::new("new"), None));
        subscriber.deliver(1, AuthEvent::unauthenticated());
        assert_eq!(*seen.lock().unwrap(), vec![AuthState::Authenticated]);
    }
}
