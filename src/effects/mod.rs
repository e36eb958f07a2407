//! Effect system for card abilities.
//!
//! - `Effect`: An identity-bearing reactive rule (owner, category, action)
//! - `EffectAction`: Catalog of what an effect does, plus `Custom` closures
//! - `EffectRegistry`: Per-nexus store of active passives with duplicate
//!   detection
//! - `EffectResolver`: Executes an effect against the bus and game state
//!
//! Catalog actions that mirror an event category trigger that event instead
//! of mutating state directly, so every card can react to them.

mod effect;
mod registry;
mod resolver;

pub use effect::{CustomEffect, Effect, EffectAction, EffectHandler, Side};
pub use registry::EffectRegistry;
pub use resolver::{EffectContext, EffectResolver};
