//! Flame status events and their realtime broadcast.
//!
//! - [`FlameEvent`] — the ready/error envelope a live client reacts to.
//! - [`Broadcaster`] — publishes events on the fixed channel;
//!   [`Broadcaster::publish_best_effort`] is the fire-and-forget path
//!   the seeder uses.

pub mod broadcast;
pub mod event;

pub use broadcast::{BroadcastError, Broadcaster};
pub use event::{FlameEvent, FlameEventKind};
