//! Effect definitions.
//!
//! An `Effect` is a card's reactive rule: the event category it reacts to,
//! the entity that owns it, and what it does (`EffectAction`). Two effects
//! are equal iff owner, category and action parameters match. That equality
//! is what the per-nexus registry uses to reject duplicates.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, Team};
use crate::events::{EventCategory, EventPayload};

use super::resolver::EffectContext;

/// Which nexus or nexuses an effect aims at, relative to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The owner's own team.
    Own,
    /// Every other team.
    Opponents,
}

impl Side {
    /// Resolve to concrete teams for an owner on `own` in a game of
    /// `team_count` teams.
    #[must_use]
    pub fn teams(self, own: Team, team_count: usize) -> SmallVec<[Team; 2]> {
        match self {
            Side::Own => smallvec::smallvec![own],
            Side::Opponents => Team::all(team_count).filter(|t| *t != own).collect(),
        }
    }
}

/// Handler signature for game-specific effects.
pub type EffectHandler = Rc<dyn Fn(&mut EffectContext<'_>, &EventPayload)>;

/// A named, parameterized effect implemented by a closure.
///
/// Identity is the name plus the parameters; the handler is not compared.
#[derive(Clone)]
pub struct CustomEffect {
    name: String,
    params: SmallVec<[i64; 4]>,
    handler: EffectHandler,
}

impl CustomEffect {
    /// Create a custom effect with no parameters.
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&mut EffectContext<'_>, &EventPayload) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params: SmallVec::new(),
            handler: Rc::new(handler),
        }
    }

    /// Attach identity-bearing parameters (builder pattern).
    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = i64>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Effect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity-bearing parameters.
    #[must_use]
    pub fn params(&self) -> &[i64] {
        &self.params
    }

    pub(crate) fn run(&self, ctx: &mut EffectContext<'_>, payload: &EventPayload) {
        (self.handler)(ctx, payload);
    }
}

impl PartialEq for CustomEffect {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params
    }
}

impl Eq for CustomEffect {}

impl fmt::Debug for CustomEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomEffect")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// What an effect does when it fires.
///
/// Catalog actions that correspond to an event category (nexus damage, card
/// draw, mana gems, stun) trigger that event, so other cards can react to
/// them in turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectAction {
    /// Deal damage to nexuses. Triggers `NexusDamage` per nexus.
    DamageNexus { side: Side, amount: i64 },

    /// Restore nexus health, capped at the nexus maximum.
    HealNexus { side: Side, amount: i64 },

    /// Owner draws cards. Triggers `CardDrawn` per card.
    DrawCards { count: usize },

    /// Owner gains mana gems. Triggers `GainManaGem`.
    GainManaGem { amount: u32 },

    /// Permanently grant stats to the owning card.
    Buff { power: i64, health: i64 },

    /// Owner's controller picks an enemy unit to stun. Triggers `Stun`.
    StunChosenEnemy,

    /// Game-specific behavior.
    Custom(CustomEffect),
}

/// A reactive rule owned by an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effect {
    /// Entity that owns the effect.
    pub owner: EntityId,

    /// Category the effect reacts to.
    pub category: EventCategory,

    /// What happens when it fires.
    pub action: EffectAction,
}

impl Effect {
    /// Create an effect.
    #[must_use]
    pub fn new(owner: EntityId, category: EventCategory, action: EffectAction) -> Self {
        Self {
            owner,
            category,
            action,
        }
    }

    /// Create a custom effect.
    pub fn custom(
        owner: EntityId,
        category: EventCategory,
        name: impl Into<String>,
        handler: impl Fn(&mut EffectContext<'_>, &EventPayload) + 'static,
    ) -> Self {
        Self::new(owner, category, EffectAction::Custom(CustomEffect::new(name, handler)))
    }
}
