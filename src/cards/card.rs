//! Card entities - runtime card state and bound reactions.
//!
//! A `Card` is one physical card in a game: its owner, stats, current zone
//! and the effects it carries. Effects are bound per event category; when the
//! card is subscribed to a category, the bus runs every effect the card binds
//! to that category, in declaration order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, Team};
use crate::effects::{CustomEffect, Effect, EffectAction, EffectContext};
use crate::events::{EventCategory, EventPayload};

/// Broad card type. Only units and landmarks occupy the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Unit,
    Spell,
    Landmark,
}

impl CardKind {
    /// Does a played card of this kind stay on the board?
    #[must_use]
    pub const fn is_field_card(self) -> bool {
        matches!(self, CardKind::Unit | CardKind::Landmark)
    }
}

/// Where a card currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    Deck,
    Hand,
    Board,
    /// A played spell waiting to be cast.
    Casting,
    Graveyard,
}

/// A card in a game.
#[derive(Clone, Debug)]
pub struct Card {
    /// Unique entity handle.
    pub id: EntityId,

    /// Display name.
    pub name: String,

    /// Owning team. Fixed for the card's lifetime.
    pub owner: Team,

    /// Card type.
    pub kind: CardKind,

    /// Mana cost.
    pub cost: u32,

    /// Attack power.
    pub power: i64,

    /// Maximum health.
    pub health: i64,

    /// Damage currently marked on the card.
    pub damage: i64,

    /// Champion level (1 for non-champions).
    pub level: u8,

    /// Stunned units cannot attack or block this round.
    pub stunned: bool,

    /// Current zone.
    pub zone: Zone,

    effects: SmallVec<[Effect; 2]>,
}

impl Card {
    /// Create a card with no stats and no effects.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, owner: Team, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            kind,
            cost: 0,
            power: 0,
            health: 0,
            damage: 0,
            level: 1,
            stunned: false,
            zone: Zone::default(),
            effects: SmallVec::new(),
        }
    }

    /// Create a unit with the given stats.
    #[must_use]
    pub fn unit(
        id: EntityId,
        name: impl Into<String>,
        owner: Team,
        power: i64,
        health: i64,
    ) -> Self {
        let mut card = Self::new(id, name, owner, CardKind::Unit);
        card.power = power;
        card.health = health;
        card
    }

    /// Create a spell.
    #[must_use]
    pub fn spell(id: EntityId, name: impl Into<String>, owner: Team) -> Self {
        Self::new(id, name, owner, CardKind::Spell)
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the starting zone (builder pattern).
    #[must_use]
    pub fn in_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Bind a catalog effect to an event category (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, category: EventCategory, action: EffectAction) -> Self {
        self.effects.push(Effect::new(self.id, category, action));
        self
    }

    /// Bind a game-specific effect to an event category (builder pattern).
    #[must_use]
    pub fn with_custom(
        self,
        category: EventCategory,
        name: impl Into<String>,
        handler: impl Fn(&mut EffectContext<'_>, &EventPayload) + 'static,
    ) -> Self {
        self.with_effect(category, EffectAction::Custom(CustomEffect::new(name, handler)))
    }

    /// All effects bound to this card.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Effects bound to one category, in declaration order.
    pub fn effects_for(&self, category: EventCategory) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(move |e| e.category == category)
    }

    /// Distinct categories this card reacts to, in first-declared order.
    #[must_use]
    pub fn categories(&self) -> SmallVec<[EventCategory; 4]> {
        let mut out: SmallVec<[EventCategory; 4]> = SmallVec::new();
        for effect in &self.effects {
            if !out.contains(&effect.category) {
                out.push(effect.category);
            }
        }
        out
    }

    /// Health left after damage.
    #[must_use]
    pub fn remaining_health(&self) -> i64 {
        self.health.saturating_sub(self.damage)
    }

    /// Has the card taken lethal damage?
    #[must_use]
    pub fn is_lethally_damaged(&self) -> bool {
        self.kind == CardKind::Unit && self.remaining_health() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Side;

    #[test]
    fn test_unit_builder() {
        let card = Card::unit(EntityId(5), "Vanguard", Team::BLUE, 3, 4)
            .with_cost(2)
            .in_zone(Zone::Hand);

        assert_eq!(card.power, 3);
        assert_eq!(card.health, 4);
        assert_eq!(card.cost, 2);
        assert_eq!(card.zone, Zone::Hand);
        assert_eq!(card.level, 1);
        assert!(card.effects().is_empty());
    }

    #[test]
    fn test_effects_are_owned_by_card() {
        let card = Card::unit(EntityId(9), "Pyromancer", Team::RED, 2, 1)
            .with_effect(
                EventCategory::Summon,
                EffectAction::DamageNexus { side: Side::Opponents, amount: 1 },
            );

        let effect = &card.effects()[0];
        assert_eq!(effect.owner, EntityId(9));
        assert_eq!(effect.category, EventCategory::Summon);
    }

    #[test]
    fn test_categories_deduplicated_in_order() {
        let card = Card::unit(EntityId(1), "Sentinel", Team::BLUE, 1, 1)
            .with_effect(EventCategory::RoundStart, EffectAction::DrawCards { count: 1 })
            .with_effect(EventCategory::Attack, EffectAction::Buff { power: 1, health: 0 })
            .with_effect(EventCategory::RoundStart, EffectAction::GainManaGem { amount: 1 });

        assert_eq!(
            card.categories().as_slice(),
            &[EventCategory::RoundStart, EventCategory::Attack]
        );
        assert_eq!(card.effects_for(EventCategory::RoundStart).count(), 2);
        assert_eq!(card.effects_for(EventCategory::Block).count(), 0);
    }

    #[test]
    fn test_lethal_damage() {
        let mut card = Card::unit(EntityId(1), "Poro", Team::BLUE, 2, 2);
        assert!(!card.is_lethally_damaged());
        card.damage = 2;
        assert!(card.is_lethally_damaged());

        let mut spell = Card::spell(EntityId(2), "Mystic Shot", Team::BLUE);
        spell.damage = 5;
        assert!(!spell.is_lethally_damaged());
    }

    #[test]
    fn test_field_card_kinds() {
        assert!(CardKind::Unit.is_field_card());
        assert!(CardKind::Landmark.is_field_card());
        assert!(!CardKind::Spell.is_field_card());
    }
}
