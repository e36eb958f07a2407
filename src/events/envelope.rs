//! The event envelope and its trigger protocol.

use tracing::debug;

use crate::core::GameState;

use super::bus::EventBus;
use super::catalog::{EventCategory, EventPayload};

/// Wraps exactly one payload for a single trigger.
///
/// `trigger` takes the envelope by value, so an event cannot fire twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    payload: EventPayload,
}

impl Event {
    #[must_use]
    pub fn new(payload: EventPayload) -> Self {
        Self { payload }
    }

    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.payload.category()
    }

    #[must_use]
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    #[must_use]
    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    /// Fire the event.
    ///
    /// 1. Journal the payload at the current cascade depth
    /// 2. Apply the baseline mutation
    /// 3. Notify every subscriber of the category through the bus
    ///
    /// The baseline is complete before the first subscriber runs. Events
    /// triggered by subscribers run to completion before this returns.
    pub fn trigger(self, bus: &mut EventBus, state: &mut GameState) {
        debug!(
            category = %self.payload.category(),
            team = %self.payload.team(),
            depth = state.cascade_depth(),
            "trigger"
        );

        state.enter_cascade(&self.payload);
        self.payload.apply_baseline(state);
        bus.inform(state, &self.payload);
        state.leave_cascade();
    }
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        Self::new(payload)
    }
}
