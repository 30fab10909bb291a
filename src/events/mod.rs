//! Event system.
//!
//! All cross-component notification flows through a typed, synchronous
//! publish/subscribe bus. Movement publishes events; cell effects, rules,
//! and the turn engine react to them.
//!
//! ## Key Components
//!
//! - [`EventKind`]: Event type discriminant used as subscription key
//! - [`EventPayload`]: Strongly typed payload, one variant per kind
//! - [`GameEvent`]: Payload plus timestamp and description
//! - [`EventBus`]: Listener storage, idempotent per subscriber
//! - [`EventHost`]: A context that owns a bus and publishes through it
//!
//! ## Example Usage
//!
//! ```
//! use dice_race::events::{
//!     EventBus, EventHost, EventKind, EventPayload, GameEvent, SubscriberId,
//! };
//!
//! #[derive(Default)]
//! struct Counter {
//!     bus: EventBus<Counter>,
//!     starts: u32,
//! }
//!
//! impl EventHost for Counter {
//!     fn event_bus(&self) -> &EventBus<Self> {
//!         &self.bus
//!     }
//! }
//!
//! let mut host = Counter::default();
//! host.bus.subscribe(EventKind::GameStarted, SubscriberId::new("counter"), |c: &mut Counter, _| {
//!     c.starts += 1;
//!     Ok(())
//! });
//!
//! host.publish(GameEvent::new(EventPayload::GameStarted, "go"));
//! assert_eq!(host.starts, 1);
//! ```

mod bus;
mod event;

pub use bus::{EventBus, EventHost, Listener, SubscriberId};
pub use event::{EventKind, EventPayload, GameEvent};
