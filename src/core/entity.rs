//! Entity identification.
//!
//! Every card in a game has a unique `EntityId`. Ids are handed out by
//! [`GameState::alloc_entity`](crate::core::GameState::alloc_entity) in
//! increasing order and are never reused, so a handle held by a registry can
//! never alias a different card after the original leaves the game.
//!
//! Registries store ids, not cards. Resolving an id always goes through the
//! game state's card table and yields `None` for a departed card.
//!
//! ```
//! use ccg_dispatch::core::EntityId;
//!
//! let card = EntityId::new(7);
//! assert_eq!(card.raw(), 7);
//! assert_eq!(format!("{}", card), "Entity(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique, never-reused handle for a card or token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id following this one in allocation order.
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
