//! Players and everything they own.
//!
//! ## Key Types
//!
//! - `Player`: Aggregate of nexus, deck, hand, board, mana, flags, controller
//! - `Nexus`: Health pool plus the per-player `EffectRegistry`
//! - `Deck` / `Hand`: Ordered piles of entity handles
//! - `Controller`: Decision source (scripted human input or random AI)

pub mod controller;
pub mod deck;
pub mod nexus;
#[allow(clippy::module_inception)]
pub mod player;

pub use controller::{Controller, RandomController, ScriptedController};
pub use deck::{Deck, Hand};
pub use nexus::Nexus;
pub use player::{Flags, Mana, Player};
