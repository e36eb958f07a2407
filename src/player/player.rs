//! The player aggregate.
//!
//! A `Player` owns everything that belongs to one seat: nexus, deck, hand,
//! board row, graveyard, mana, flags and the controller that makes its
//! decisions. The team is fixed at construction; everything else changes
//! through play.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::cards::Zone;
use crate::core::{EntityId, Team};

use super::controller::Controller;
use super::deck::{remove_first, Deck, Hand};
use super::nexus::Nexus;

/// Mana pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    /// Permanent gems; refill `common` each round.
    pub gems: u32,
    /// Mana available this round for any card.
    pub common: u32,
    /// Banked mana usable only for spells.
    pub spell: u32,
}

impl Mana {
    /// Pay `cost`, spending spell mana first when paying for a spell.
    /// Returns `false` and changes nothing if the pools cannot cover it.
    pub fn pay(&mut self, cost: u32, is_spell: bool) -> bool {
        let from_spell = if is_spell { self.spell.min(cost) } else { 0 };
        let rest = cost - from_spell;
        if rest > self.common {
            return false;
        }
        self.spell -= from_spell;
        self.common -= rest;
        true
    }
}

bitflags! {
    /// Per-player round flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Flags: u8 {
        /// The player may declare an attack this round.
        const ATTACK_TOKEN = 1 << 0;
        /// The first card played this round triggered Daybreak.
        const DAYBREAK     = 1 << 1;
        /// A later card played this round triggered Nightfall.
        const NIGHTFALL    = 1 << 2;
        /// The player damaged the enemy nexus this round.
        const PLUNDER      = 1 << 3;
    }
}

/// One seat at the table.
#[derive(Debug)]
pub struct Player {
    team: Team,
    controller: Box<dyn Controller>,

    /// Health and active passives.
    pub nexus: Nexus,

    pub deck: Deck,

    pub hand: Hand,

    /// Units and landmarks in play, left to right.
    pub board: Vec<EntityId>,

    /// Dead units, cast spells, burned and discarded cards.
    pub graveyard: Vec<EntityId>,

    pub mana: Mana,

    pub flags: Flags,

    /// Cards played since the round started.
    pub plays_this_round: u32,
}

impl Player {
    /// Create a player with an empty hand and board.
    pub fn new(team: Team, nexus: Nexus, deck: Deck, controller: Box<dyn Controller>) -> Self {
        Self {
            team,
            controller,
            nexus,
            deck,
            hand: Hand::new(),
            board: Vec::new(),
            graveyard: Vec::new(),
            mana: Mana::default(),
            flags: Flags::empty(),
            plays_this_round: 0,
        }
    }

    /// Starting mana (builder pattern).
    #[must_use]
    pub fn with_mana(mut self, mana: Mana) -> Self {
        self.mana = mana;
        self
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn controller(&self) -> &dyn Controller {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn Controller {
        self.controller.as_mut()
    }

    /// Swap in a different decision source, returning the old one.
    pub fn replace_controller(&mut self, controller: Box<dyn Controller>) -> Box<dyn Controller> {
        std::mem::replace(&mut self.controller, controller)
    }

    /// Take `card` out of whichever of this player's piles `zone` names.
    /// Returns whether it was found there.
    pub(crate) fn take_from(&mut self, zone: Zone, card: EntityId) -> bool {
        match zone {
            Zone::Deck => self.deck.remove(card),
            Zone::Hand => self.hand.remove(card),
            Zone::Board => remove_first(&mut self.board, card),
            Zone::Graveyard => remove_first(&mut self.graveyard, card),
            Zone::Casting => true,
        }
    }

    /// Put `card` into the pile `zone` names.
    pub(crate) fn put_into(&mut self, zone: Zone, card: EntityId) {
        match zone {
            Zone::Deck => self.deck.push_top(card),
            Zone::Hand => self.hand.push(card),
            Zone::Board => self.board.push(card),
            Zone::Graveyard => self.graveyard.push(card),
            Zone::Casting => {}
        }
    }
}
