//! Concrete event records and their baseline mutations.
//!
//! Every payload names the team on whose behalf it happened and refers to
//! cards only by `EntityId`. The baseline is the rule effect that always
//! happens when the event fires, before any subscriber hears about it.
//! Many events have none; they exist purely to be reacted to.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Zone;
use crate::core::{EntityId, GameState, Team};
use crate::player::Flags;

/// The unconditional state change an event makes when triggered.
pub trait Baseline {
    fn apply(&self, _state: &mut GameState) {}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub team: Team,
}

/// Declaring an attack spends the attack token.
impl Baseline for Attack {
    fn apply(&self, state: &mut GameState) {
        if let Some(player) = state.player_mut(self.team) {
            player.flags.remove(Flags::ATTACK_TOKEN);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub team: Team,
}

impl Baseline for Block {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub team: Team,
    pub spell: EntityId,
}

impl Baseline for Cast {
    fn apply(&self, state: &mut GameState) {
        state.move_card(self.spell, Zone::Graveyard);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDrawn {
    pub team: Team,
    pub card: EntityId,
}

/// Deck to hand. A full hand burns the card instead.
impl Baseline for CardDrawn {
    fn apply(&self, state: &mut GameState) {
        let max = state.config().max_hand_size;
        let Some(player) = state.player(self.team) else {
            return;
        };
        if player.hand.len() >= max {
            debug!(team = %self.team, card = %self.card, "hand full, card burned");
            state.move_card(self.card, Zone::Graveyard);
        } else {
            state.move_card(self.card, Zone::Hand);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDiscarded {
    pub team: Team,
    pub cause: Option<EntityId>,
    pub card: EntityId,
}

impl Baseline for CardDiscarded {
    fn apply(&self, state: &mut GameState) {
        state.move_card(self.card, Zone::Graveyard);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlayed {
    pub team: Team,
    pub card: EntityId,
}

/// Hand to board (units, landmarks) or to the casting area (spells), paying
/// the cost. Whether the play was legal is the rules' concern.
impl Baseline for CardPlayed {
    fn apply(&self, state: &mut GameState) {
        let Some((kind, cost)) = state.card(self.card).map(|c| (c.kind, c.cost)) else {
            return;
        };
        let zone = if kind.is_field_card() { Zone::Board } else { Zone::Casting };
        state.move_card(self.card, zone);

        if let Some(player) = state.player_mut(self.team) {
            if !player.mana.pay(cost, !kind.is_field_card()) {
                debug!(
                    team = %self.team,
                    card = %self.card,
                    cost,
                    "card played without enough mana"
                );
            }
            player.plays_this_round += 1;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summon {
    pub team: Team,
    pub card: EntityId,
}

impl Baseline for Summon {
    fn apply(&self, state: &mut GameState) {
        if state.card(self.card).is_some_and(|c| c.zone != Zone::Board) {
            state.move_card(self.card, Zone::Board);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recall {
    pub team: Team,
    pub cause: Option<EntityId>,
    pub card: EntityId,
}

/// Board to hand. Damage and stun do not follow the card.
impl Baseline for Recall {
    fn apply(&self, state: &mut GameState) {
        if state.move_card(self.card, Zone::Hand) {
            if let Some(card) = state.card_mut(self.card) {
                card.damage = 0;
                card.stunned = false;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub team: Team,
    pub striker: EntityId,
    /// `None` when the nexus is struck.
    pub struck: Option<EntityId>,
}

impl Baseline for Strike {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDamage {
    pub team: Team,
    pub source: Option<EntityId>,
    pub unit: EntityId,
    pub amount: i64,
}

impl Baseline for UnitDamage {
    fn apply(&self, state: &mut GameState) {
        if let Some(card) = state.card_mut(self.unit) {
            card.damage = card.damage.saturating_add(self.amount.max(0));
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NexusDamage {
    pub team: Team,
    pub source: Option<EntityId>,
    pub target: Team,
    pub amount: i64,
}

/// Damaging an enemy nexus also grants plunder.
impl Baseline for NexusDamage {
    fn apply(&self, state: &mut GameState) {
        if let Some(nexus) = state.nexus_mut(self.target) {
            nexus.damage(self.amount);
        }
        if self.amount > 0 && self.target != self.team {
            if let Some(player) = state.player_mut(self.team) {
                player.flags.insert(Flags::PLUNDER);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealUnit {
    pub team: Team,
    pub healer: Option<EntityId>,
    pub unit: EntityId,
    pub amount: i64,
}

impl Baseline for HealUnit {
    fn apply(&self, state: &mut GameState) {
        if let Some(card) = state.card_mut(self.unit) {
            card.damage = (card.damage - self.amount.max(0)).max(0);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDied {
    pub team: Team,
    pub killer: Option<EntityId>,
    pub unit: EntityId,
}

impl Baseline for UnitDied {
    fn apply(&self, state: &mut GameState) {
        state.move_card(self.unit, Zone::Graveyard);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stun {
    pub team: Team,
    pub cause: Option<EntityId>,
    pub unit: EntityId,
}

impl Baseline for Stun {
    fn apply(&self, state: &mut GameState) {
        if let Some(card) = state.card_mut(self.unit) {
            card.stunned = true;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub team: Team,
    pub champion: EntityId,
}

impl Baseline for LevelUp {
    fn apply(&self, state: &mut GameState) {
        if let Some(card) = state.card_mut(self.champion) {
            card.level = card.level.saturating_add(1);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GainManaGem {
    pub team: Team,
    pub amount: u32,
}

impl Baseline for GainManaGem {
    fn apply(&self, state: &mut GameState) {
        let max = state.config().max_mana_gems;
        if let Some(player) = state.player_mut(self.team) {
            player.mana.gems = player.mana.gems.saturating_add(self.amount).min(max);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enlightenment {
    pub team: Team,
}

impl Baseline for Enlightenment {}

/// A new round begins; `team` holds the attack token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStart {
    pub team: Team,
    pub round: u32,
}

impl Baseline for RoundStart {
    fn apply(&self, state: &mut GameState) {
        state.round = self.round;
        for (team, player) in state.players_mut().iter_mut() {
            player.mana.common = player.mana.gems;
            player.plays_this_round = 0;
            player.flags.remove(Flags::DAYBREAK);
            player.flags.remove(Flags::NIGHTFALL);
            player.flags.remove(Flags::PLUNDER);
            player.flags.set(Flags::ATTACK_TOKEN, team == self.team);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub team: Team,
    pub round: u32,
}

/// Unspent mana is banked as spell mana; stuns wear off.
impl Baseline for RoundEnd {
    fn apply(&self, state: &mut GameState) {
        let max_spell = state.config().max_spell_mana;
        let mut units = Vec::new();
        for (_, player) in state.players_mut().iter_mut() {
            let mana = &mut player.mana;
            mana.spell = mana.spell.saturating_add(mana.common).min(max_spell);
            mana.common = 0;
            units.extend(player.board.iter().copied());
        }
        for unit in units {
            if let Some(card) = state.card_mut(unit) {
                card.stunned = false;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Daybreak {
    pub team: Team,
    pub card: EntityId,
}

impl Baseline for Daybreak {
    fn apply(&self, state: &mut GameState) {
        if let Some(player) = state.player_mut(self.team) {
            player.flags.insert(Flags::DAYBREAK);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nightfall {
    pub team: Team,
    pub card: EntityId,
}

impl Baseline for Nightfall {
    fn apply(&self, state: &mut GameState) {
        if let Some(player) = state.player_mut(self.team) {
            player.flags.insert(Flags::NIGHTFALL);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub team: Team,
    pub cause: EntityId,
    pub target: EntityId,
}

impl Baseline for Target {}
