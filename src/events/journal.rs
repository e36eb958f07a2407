//! Event journal for replay and sync.
//!
//! `GameState` appends one entry per trigger, cascades included, tagged with
//! the cascade depth at which it fired. Top-level entries (depth 0) are the
//! session's own decisions; everything deeper follows from them
//! deterministically given the same seed, cards and subscriptions. Replay
//! therefore re-triggers only depth-0 entries.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameState, Result};

use super::bus::EventBus;
use super::catalog::EventPayload;
use super::envelope::Event;

/// One triggered payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Cascade depth when the event fired (0 = triggered by the session).
    pub depth: u16,
    pub payload: EventPayload,
}

impl JournalEntry {
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}

/// Persistent vector, so cloning a state's journal is O(1).
pub type Journal = Vector<JournalEntry>;

/// Serialize a journal with bincode.
pub fn encode(journal: &Journal) -> Result<Vec<u8>> {
    Ok(bincode::serialize(journal)?)
}

/// Deserialize a journal produced by `encode`.
pub fn decode(bytes: &[u8]) -> Result<Journal> {
    Ok(bincode::deserialize(bytes)?)
}

/// Re-trigger the top-level entries of `journal` against `state`.
///
/// `state` and `bus` must start as the recorded game did: same seed, cards
/// and subscriptions. Returns the number of events re-triggered.
pub fn replay(bus: &mut EventBus, state: &mut GameState, journal: &Journal) -> usize {
    let mut count = 0;
    for entry in journal.iter().filter(|e| e.is_top_level()) {
        Event::new(entry.payload.clone()).trigger(bus, state);
        count += 1;
    }
    debug!(count, recorded = journal.len(), "journal replayed");
    count
}
