//! Events: the envelope, the catalog, the bus and its subscription registry.
//!
//! ## Flow
//!
//! A rule builds a payload, wraps it in an `Event` and calls
//! `trigger(bus, state)`. The payload's baseline mutation runs first, then
//! `EventBus::inform` notifies every subscriber of the payload's category.
//! Subscribers may trigger further events; each runs to completion before
//! control returns to the subscriber that fired it.
//!
//! ## Key Types
//!
//! - `EventCategory`: Closed set of occurrence kinds
//! - `EventPayload`: One concrete record per category (see `payload`)
//! - `Event`: Single-use envelope owning the trigger protocol
//! - `EventBus`: Dispatcher
//! - `SubscriptionRegistry`: Category → subscribed entities
//! - `Journal`: Record of triggered payloads for replay

pub mod bus;
pub mod catalog;
pub mod envelope;
pub mod journal;
pub mod listener;
pub mod payload;

pub use bus::EventBus;
pub use catalog::{EventCategory, EventPayload};
pub use envelope::Event;
pub use journal::{replay, Journal, JournalEntry};
pub use listener::{SubscriptionRegistry, Subscribers};
pub use payload::Baseline;
