//! Core engine types: entities, teams, state, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module leans on.
//! Sessions configure the engine via `EngineConfig` rather than modifying
//! the core.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod state;
pub mod team;

pub use config::{DispatchOrder, EngineConfig};
pub use entity::EntityId;
pub use error::{EngineError, Result};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
pub use team::{Team, TeamMap};
