//! The event bus: routes triggered events to their subscribers.
//!
//! `inform` notifies, in order:
//! 1. Every entity subscribed to the payload's category, running each effect
//!    the entity's card binds to that category
//! 2. Passive effects registered for the category in each nexus, team by team
//!
//! Subscribers are read from a snapshot taken when `inform` starts. Effects
//! may subscribe or unsubscribe anyone while it runs: an entity removed
//! mid-dispatch is skipped when its turn comes, an entity added mid-dispatch
//! waits for the next event.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::cards::Card;
use crate::core::{DispatchOrder, EngineConfig, EntityId, GameState, Team};
use crate::effects::{Effect, EffectContext, EffectResolver};

use super::catalog::{EventCategory, EventPayload};
use super::envelope::Event;
use super::listener::SubscriptionRegistry;

/// Dispatcher plus the subscription registry it reads.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    listeners: SubscriptionRegistry,
    order: DispatchOrder,
}

impl EventBus {
    /// Create a bus that notifies in subscription order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus with an explicit tie-break policy.
    #[must_use]
    pub fn with_order(order: DispatchOrder) -> Self {
        Self {
            listeners: SubscriptionRegistry::new(),
            order,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_order(config.dispatch_order)
    }

    #[must_use]
    pub fn order(&self) -> DispatchOrder {
        self.order
    }

    #[must_use]
    pub fn listeners(&self) -> &SubscriptionRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut SubscriptionRegistry {
        &mut self.listeners
    }

    // === Subscriptions ===

    pub fn subscribe(
        &mut self,
        entity: EntityId,
        categories: impl IntoIterator<Item = EventCategory>,
    ) -> usize {
        self.listeners.subscribe(entity, categories)
    }

    /// Subscribe a card to every category its effects react to.
    pub fn subscribe_card(&mut self, card: &Card) -> usize {
        self.listeners.subscribe_card(card)
    }

    pub fn unsubscribe(&mut self, entity: EntityId) -> bool {
        self.listeners.unsubscribe(entity)
    }

    /// Take a departing card out of play: drop all its subscriptions and
    /// purge every passive it granted from every nexus.
    ///
    /// Returns whether anything was removed.
    pub fn retire(&mut self, state: &mut GameState, entity: EntityId) -> bool {
        let unsubscribed = self.listeners.unsubscribe(entity);
        let purged: usize = state
            .players_mut()
            .values_mut()
            .map(|player| player.nexus.effects.remove_owned_by(entity))
            .sum();

        debug!(%entity, unsubscribed, purged, "retired");
        unsubscribed || purged > 0
    }

    // === Dispatch ===

    /// Trigger an event from outside any effect.
    pub fn announce(&mut self, state: &mut GameState, event: impl Into<Event>) {
        event.into().trigger(self, state);
    }

    /// Notify everyone reacting to `payload`'s category.
    ///
    /// Called by `Event::trigger` after the baseline has been applied.
    pub fn inform(&mut self, state: &mut GameState, payload: &EventPayload) {
        let category = payload.category();
        let mut subscribers = self.listeners.snapshot(category);
        if self.order == DispatchOrder::Shuffled && subscribers.len() > 1 {
            state.rng.shuffle(subscribers.as_mut_slice());
        }

        trace!(%category, subscribers = subscribers.len(), "inform");

        for entity in subscribers {
            if !self.listeners.is_subscribed(entity, category) {
                trace!(%entity, %category, "unsubscribed during dispatch, skipped");
                continue;
            }
            let Some(card) = state.card(entity) else {
                warn!(%entity, %category, "subscriber is not in the game, skipped");
                continue;
            };

            let team = card.owner;
            let effects: SmallVec<[Effect; 2]> = card.effects_for(category).cloned().collect();
            for effect in &effects {
                // An earlier effect of the same card may have unsubscribed it.
                if !self.listeners.is_subscribed(entity, category) {
                    break;
                }
                trace!(%entity, %category, "notify");
                let mut ctx = EffectContext::new(self, state, entity, team);
                EffectResolver::resolve(effect, &mut ctx, payload);
            }
        }

        self.inform_passives(state, payload);
    }

    fn inform_passives(&mut self, state: &mut GameState, payload: &EventPayload) {
        let category = payload.category();
        for team in Team::all(state.team_count()) {
            let passives: SmallVec<[Effect; 2]> = match state.nexus(team) {
                Some(nexus) if nexus.effects.has_any(category) => {
                    nexus.effects.effects(category).iter().cloned().collect()
                }
                _ => continue,
            };

            for effect in &passives {
                let still_active = state
                    .nexus(team)
                    .is_some_and(|n| n.effects.has_effect(category, effect));
                if !still_active {
                    continue;
                }
                trace!(owner = %effect.owner, %team, %category, "notify passive");
                let mut ctx = EffectContext::new(self, state, effect.owner, team);
                EffectResolver::resolve(effect, &mut ctx, payload);
            }
        }
    }
}
