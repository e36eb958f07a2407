//! Error types for the fallible parts of the engine surface.
//!
//! Dispatch itself never fails: absent subscribers, unknown categories and
//! departed cards resolve to no-ops. Errors only arise at the edges where a
//! session hands the engine data it cannot use.

use thiserror::Error;

use super::{EntityId, Team};

/// Errors raised by configuration, strict lookups and journal encoding.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A team index outside the configured team count.
    #[error("unknown team: {0}")]
    UnknownTeam(Team),

    /// A card that is not (or no longer) part of the game.
    #[error("unknown card: {0}")]
    UnknownCard(EntityId),

    /// A card id that is already in the card table.
    #[error("duplicate card: {0}")]
    DuplicateCard(EntityId),

    /// Journal could not be encoded or decoded.
    #[error("journal codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Configuration text could not be parsed or written.
    #[error("config format error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
