//! # ccg-dispatch
//!
//! The reactive trigger-dispatch core of a turn-based card game engine.
//!
//! Discrete game occurrences (a card played, damage dealt, a unit dying, a
//! round starting) are broadcast as events to the card abilities subscribed
//! to them. Abilities mutate the shared game state and may fire further
//! events, which run to completion before control returns.
//!
//! ## Design Principles
//!
//! 1. **Two-Phase Trigger**: Every event applies its baseline rule effect
//!    before any subscriber hears about it.
//!
//! 2. **Handles, Not References**: Registries hold `EntityId`s. Cards live in
//!    the `GameState` card table, and every lookup is checked, so a card that
//!    left play can never be reached through a stale subscription.
//!
//! 3. **Deterministic**: One seeded RNG threaded through `GameState`, plus a
//!    journal of every triggered payload, make games replayable.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, teams, state, RNG, configuration, errors
//! - `cards`: Card entities and the effects they bind
//! - `effects`: Effect catalog, per-nexus registry, resolver
//! - `events`: Event catalog, envelope, bus, subscriptions, journal
//! - `player`: Players, nexus, deck, hand, controllers
//!
//! ## Example
//!
//! ```
//! use ccg_dispatch::events::payload::NexusDamage;
//! use ccg_dispatch::{EventBus, GameState, Team};
//!
//! let mut bus = EventBus::new();
//! let mut state = GameState::new(2, 42);
//!
//! bus.announce(
//!     &mut state,
//!     NexusDamage { team: Team::BLUE, source: None, target: Team::RED, amount: 3 },
//! );
//! assert_eq!(state.nexus(Team::RED).map(|n| n.health()), Some(17));
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod events;
pub mod player;

// Re-export commonly used types
pub use crate::core::{
    DispatchOrder, EngineConfig, EngineError, EntityId, GameRng, GameRngState, GameState,
    Result, Team, TeamMap,
};

pub use crate::cards::{Card, CardKind, Zone};

pub use crate::effects::{
    CustomEffect, Effect, EffectAction, EffectContext, EffectRegistry, EffectResolver, Side,
};

pub use crate::events::{
    Event, EventBus, EventCategory, EventPayload, Journal, JournalEntry, SubscriptionRegistry,
};

pub use crate::player::{
    Controller, Deck, Flags, Hand, Mana, Nexus, Player, RandomController, ScriptedController,
};
