//! Synchronous publish/subscribe bus.
//!
//! Listeners are indexed by [`EventKind`]. Publishing calls every listener
//! registered for that kind, in subscription order, before returning. The
//! bus is generic over the context type `C` that listeners mutate, so the
//! same bus works for the game context and for small test hosts.
//!
//! ## Subscriber identity
//!
//! Each subscription is tagged with a [`SubscriberId`] naming the component
//! that registered it. Subscribing the same component to the same kind
//! twice is a no-op, which lets components re-attach on every game
//! initialization without stacking duplicate handlers.
//!
//! ## Failure isolation
//!
//! Listeners return `Result`. An `Err` is logged and delivery continues
//! with the next listener; the publisher never sees it.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{error, trace};

use crate::core::GameError;

use super::event::{EventKind, GameEvent};

/// A listener callback. Receives the host context mutably.
pub type Listener<C> = Arc<dyn Fn(&mut C, &GameEvent) -> Result<(), GameError> + Send + Sync>;

/// Name of the component owning a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(&'static str);

impl SubscriberId {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

struct Subscription<C> {
    subscriber: SubscriberId,
    listener: Listener<C>,
}

impl<C> Clone for Subscription<C> {
    fn clone(&self) -> Self {
        Self {
            subscriber: self.subscriber,
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Event bus over host context `C`.
pub struct EventBus<C> {
    by_kind: FxHashMap<EventKind, Vec<Subscription<C>>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            by_kind: FxHashMap::default(),
        }
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, subs) in &self.by_kind {
            let names: Vec<_> = subs.iter().map(|s| s.subscriber.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}

impl<C> EventBus<C> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `kind` on behalf of `subscriber`.
    ///
    /// Returns `false` (and keeps the existing listener) if `subscriber`
    /// is already registered for `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, subscriber: SubscriberId, listener: F) -> bool
    where
        F: Fn(&mut C, &GameEvent) -> Result<(), GameError> + Send + Sync + 'static,
    {
        let subs = self.by_kind.entry(kind).or_default();
        if subs.iter().any(|s| s.subscriber == subscriber) {
            trace!(%kind, %subscriber, "duplicate subscription ignored");
            return false;
        }

        subs.push(Subscription {
            subscriber,
            listener: Arc::new(listener),
        });
        true
    }

    /// Remove `subscriber`'s listener for `kind`. Returns whether one existed.
    pub fn unsubscribe(&mut self, kind: EventKind, subscriber: SubscriberId) -> bool {
        let Some(subs) = self.by_kind.get_mut(&kind) else {
            return false;
        };

        let before = subs.len();
        subs.retain(|s| s.subscriber != subscriber);
        let removed = subs.len() != before;

        if subs.is_empty() {
            self.by_kind.remove(&kind);
        }
        removed
    }

    /// Remove every subscription.
    pub fn clear(&mut self) {
        self.by_kind.clear();
    }

    #[must_use]
    pub fn is_subscribed(&self, kind: EventKind, subscriber: SubscriberId) -> bool {
        self.by_kind
            .get(&kind)
            .is_some_and(|subs| subs.iter().any(|s| s.subscriber == subscriber))
    }

    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Copy of the current listener list for `kind`.
    ///
    /// Delivery iterates the copy, so listeners may subscribe or
    /// unsubscribe while an event is in flight without affecting it.
    fn snapshot(&self, kind: EventKind) -> SmallVec<[Subscription<C>; 4]> {
        self.by_kind
            .get(&kind)
            .map(|subs| subs.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// A context that owns an [`EventBus`] over itself.
///
/// Listeners get `&mut Self`, so publishing lives here rather than on the
/// bus: the bus hands out a snapshot and the host drives delivery.
pub trait EventHost: Sized {
    fn event_bus(&self) -> &EventBus<Self>;

    /// Deliver `event` to every listener for its kind, synchronously.
    fn publish(&mut self, event: GameEvent) {
        let kind = event.kind();
        let subscriptions = self.event_bus().snapshot(kind);

        if subscriptions.is_empty() {
            trace!(%kind, "no subscribers");
            return;
        }

        for sub in subscriptions {
            if let Err(err) = (sub.listener)(self, &event) {
                error!(%kind, subscriber = %sub.subscriber, %err, "event listener failed");
            }
        }
    }
}
