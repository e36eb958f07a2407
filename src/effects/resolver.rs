//! Effect resolution - executing effects against game state.
//!
//! The bus hands each notified effect to `EffectResolver::resolve` together
//! with an `EffectContext`. The context carries exclusive access to the bus
//! and the game state, so an effect can mutate the world, change
//! subscriptions, or trigger further events (a cascade) that run to
//! completion before it returns.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{EntityId, GameState, Team};
use crate::events::payload::{CardDrawn, GainManaGem, NexusDamage, Stun};
use crate::events::{Event, EventBus, EventPayload};

use super::effect::{Effect, EffectAction};

/// Everything an effect may touch while it runs.
pub struct EffectContext<'a> {
    /// The bus, for cascades and subscription changes.
    pub bus: &'a mut EventBus,
    /// The game world.
    pub state: &'a mut GameState,
    /// Entity whose effect is running.
    pub owner: EntityId,
    /// Team of that entity.
    pub team: Team,
}

impl<'a> EffectContext<'a> {
    /// Create a context for an effect owned by `owner` on `team`.
    pub fn new(
        bus: &'a mut EventBus,
        state: &'a mut GameState,
        owner: EntityId,
        team: Team,
    ) -> Self {
        Self {
            bus,
            state,
            owner,
            team,
        }
    }

    /// Trigger a nested event. Returns once it and all its reactions finish.
    pub fn trigger(&mut self, event: impl Into<Event>) {
        event.into().trigger(self.bus, self.state);
    }
}

/// Executes effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Run one effect in response to `payload`.
    pub fn resolve(effect: &Effect, ctx: &mut EffectContext<'_>, payload: &EventPayload) {
        trace!(owner = %effect.owner, category = %effect.category, "resolving effect");

        match &effect.action {
            EffectAction::DamageNexus { side, amount } => {
                for target in side.teams(ctx.team, ctx.state.team_count()) {
                    ctx.trigger(NexusDamage {
                        team: ctx.team,
                        source: Some(ctx.owner),
                        target,
                        amount: *amount,
                    });
                }
            }

            EffectAction::HealNexus { side, amount } => {
                for target in side.teams(ctx.team, ctx.state.team_count()) {
                    if let Some(nexus) = ctx.state.nexus_mut(target) {
                        nexus.heal(*amount);
                    }
                }
            }

            EffectAction::DrawCards { count } => {
                for _ in 0..*count {
                    let Some(card) = ctx.state.player(ctx.team).and_then(|p| p.deck.top()) else {
                        break;
                    };
                    // An orphan id would stay on top and be drawn forever.
                    if ctx.state.card(card).is_none() {
                        warn!(team = %ctx.team, card = %card, "deck top has no card; draw stopped");
                        break;
                    }
                    ctx.trigger(CardDrawn { team: ctx.team, card });
                }
            }

            EffectAction::GainManaGem { amount } => {
                ctx.trigger(GainManaGem {
                    team: ctx.team,
                    amount: *amount,
                });
            }

            EffectAction::Buff { power, health } => {
                if let Some(card) = ctx.state.card_mut(ctx.owner) {
                    card.power = card.power.saturating_add(*power);
                    card.health = card.health.saturating_add(*health);
                }
            }

            EffectAction::StunChosenEnemy => {
                let options = Self::stunnable_enemies(ctx.state, ctx.team);
                if let Some(unit) = ctx.state.ask_controller(ctx.team, &options) {
                    ctx.trigger(Stun {
                        team: ctx.team,
                        cause: Some(ctx.owner),
                        unit,
                    });
                }
            }

            EffectAction::Custom(custom) => custom.run(ctx, payload),
        }
    }

    /// Enemy board units that are not already stunned.
    fn stunnable_enemies(state: &GameState, own: Team) -> SmallVec<[EntityId; 8]> {
        state
            .players()
            .iter()
            .filter(|(team, _)| *team != own)
            .flat_map(|(_, player)| player.board.iter().copied())
            .filter(|id| state.card(*id).is_some_and(|c| !c.stunned))
            .collect()
    }
}
