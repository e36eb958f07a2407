//! Game state: the mutable world events act on.
//!
//! ## GameState
//!
//! Everything dispatch reads or mutates:
//! - Players (nexus, deck, hand, board, graveyard, mana, flags, controller)
//! - The card table, keyed by `EntityId`
//! - The deterministic RNG
//! - The round counter
//! - The event journal and the current cascade depth
//!
//! Cards are owned here and nowhere else. Registries and piles hold only
//! `EntityId` handles, and every lookup returns `Option`, so a handle to a
//! card that left the game resolves to "absent" instead of dangling.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::config::EngineConfig;
use super::entity::EntityId;
use super::error::{EngineError, Result};
use super::rng::GameRng;
use super::team::{Team, TeamMap};
use crate::cards::{Card, Zone};
use crate::events::journal::{self, Journal, JournalEntry};
use crate::events::EventPayload;
use crate::player::{Controller, Deck, Nexus, Player, RandomController};

/// Full game state.
pub struct GameState {
    config: EngineConfig,

    players: TeamMap<Player>,

    /// Card table by entity ID.
    cards: FxHashMap<EntityId, Card>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Current round (0 before the first RoundStart).
    pub round: u32,

    /// Every triggered payload, in trigger order.
    journal: Journal,

    /// Number of triggers currently on the call stack.
    depth: u16,

    /// Next entity ID to allocate.
    next_entity: EntityId,
}

impl GameState {
    /// Create a game with default limits, random controllers and a fixed seed.
    ///
    /// # Panics
    ///
    /// Panics if `team_count` is 0 or above 255.
    #[must_use]
    pub fn new(team_count: usize, seed: u64) -> Self {
        assert!(team_count > 0, "Must have at least 1 team");
        assert!(team_count <= 255, "At most 255 teams supported");

        let config = EngineConfig::new(team_count).with_seed(seed);
        let controllers = Self::default_controllers(team_count);
        Self::build(config, controllers)
    }

    /// Create a game from a validated configuration. Every seat gets a
    /// `RandomController`.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let controllers = Self::default_controllers(config.team_count);
        Ok(Self::build(config, controllers))
    }

    /// Create a game with one controller per team, in team order.
    pub fn with_controllers(
        config: EngineConfig,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Result<Self> {
        config.validate()?;
        if controllers.len() != config.team_count {
            return Err(EngineError::InvalidConfig(format!(
                "{} controllers supplied for {} teams",
                controllers.len(),
                config.team_count
            )));
        }
        Ok(Self::build(config, controllers))
    }

    fn default_controllers(team_count: usize) -> Vec<Box<dyn Controller>> {
        (0..team_count)
            .map(|_| Box::new(RandomController) as Box<dyn Controller>)
            .collect()
    }

    fn build(config: EngineConfig, controllers: Vec<Box<dyn Controller>>) -> Self {
        let players = controllers
            .into_iter()
            .zip(Team::all(config.team_count))
            .map(|(controller, team)| {
                Player::new(
                    team,
                    Nexus::new(team, config.starting_health),
                    Deck::default(),
                    controller,
                )
            })
            .collect();

        Self {
            rng: GameRng::create(config.seed),
            players: TeamMap::from_vec(players),
            cards: FxHashMap::default(),
            round: 0,
            journal: Vector::new(),
            depth: 0,
            next_entity: EntityId(0),
            config,
        }
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.players.team_count()
    }

    // === Players ===

    #[must_use]
    pub fn players(&self) -> &TeamMap<Player> {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut TeamMap<Player> {
        &mut self.players
    }

    #[must_use]
    pub fn player(&self, team: Team) -> Option<&Player> {
        self.players.get(team)
    }

    pub fn player_mut(&mut self, team: Team) -> Option<&mut Player> {
        self.players.get_mut(team)
    }

    /// Strict lookup for callers that treat an unknown team as an error.
    pub fn try_player(&self, team: Team) -> Result<&Player> {
        self.players.get(team).ok_or(EngineError::UnknownTeam(team))
    }

    #[must_use]
    pub fn nexus(&self, team: Team) -> Option<&Nexus> {
        self.players.get(team).map(|p| &p.nexus)
    }

    pub fn nexus_mut(&mut self, team: Team) -> Option<&mut Nexus> {
        self.players.get_mut(team).map(|p| &mut p.nexus)
    }

    /// Teams whose nexus is at zero health or below.
    #[must_use]
    pub fn destroyed_nexuses(&self) -> SmallVec<[Team; 2]> {
        self.players
            .iter()
            .filter(|(_, p)| p.nexus.is_destroyed())
            .map(|(team, _)| team)
            .collect()
    }

    /// Shuffle `team`'s deck with the game RNG. Returns `false` for an
    /// unknown team.
    pub fn shuffle_deck(&mut self, team: Team) -> bool {
        let Self { players, rng, .. } = self;
        match players.get_mut(team) {
            Some(player) => {
                player.deck.shuffle(rng);
                true
            }
            None => false,
        }
    }

    /// Ask `team`'s controller to pick one of `options`.
    ///
    /// Returns `None` when there are no options, the team is unknown, the
    /// controller declines, or it answers with something not on offer.
    pub fn ask_controller(&mut self, team: Team, options: &[EntityId]) -> Option<EntityId> {
        if options.is_empty() {
            return None;
        }
        let Self { players, rng, .. } = self;
        let choice = players
            .get_mut(team)?
            .controller_mut()
            .choose_target(options, rng)?;

        if options.contains(&choice) {
            Some(choice)
        } else {
            debug!(%team, entity = %choice, "controller chose an option not offered");
            None
        }
    }

    // === Entity Management ===

    /// Allocate a new entity ID. IDs are never reused.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = self.next_entity;
        self.next_entity = id.next();
        id
    }

    /// Add a card and place it into its owner's pile for `card.zone`.
    ///
    /// A card whose id was not allocated here advances the allocator past it.
    /// Ids already in the card table are rejected.
    pub fn add_card(&mut self, card: Card) -> Result<EntityId> {
        let id = card.id;
        if self.cards.contains_key(&id) {
            return Err(EngineError::DuplicateCard(id));
        }
        let player = self
            .players
            .get_mut(card.owner)
            .ok_or(EngineError::UnknownTeam(card.owner))?;
        player.put_into(card.zone, id);

        if id >= self.next_entity {
            self.next_entity = id.next();
        }
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Allocate an id, build a card with it, and add the card.
    pub fn spawn_card(&mut self, build: impl FnOnce(EntityId) -> Card) -> Result<EntityId> {
        let id = self.alloc_entity();
        self.add_card(build(id))
    }

    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Strict lookup for callers that treat a missing card as an error.
    pub fn try_card(&self, id: EntityId) -> Result<&Card> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Remove a card from the game entirely, including its owner's piles.
    ///
    /// Subscriptions are the bus's business; retire the card there first.
    pub fn remove_card(&mut self, id: EntityId) -> Option<Card> {
        let card = self.cards.remove(&id)?;
        if let Some(player) = self.players.get_mut(card.owner) {
            player.take_from(card.zone, id);
        }
        Some(card)
    }

    /// Every card in the game, in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Number of cards in the game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Move a card from its current pile into `zone`. Returns `false` if the
    /// card is unknown.
    pub(crate) fn move_card(&mut self, id: EntityId, zone: Zone) -> bool {
        let Some(card) = self.cards.get_mut(&id) else {
            return false;
        };
        let from = card.zone;
        card.zone = zone;

        if let Some(player) = self.players.get_mut(card.owner) {
            if !player.take_from(from, id) {
                debug!(entity = %id, ?from, "card was missing from its pile");
            }
            player.put_into(zone, id);
        }
        true
    }

    // === Journal ===

    /// Every payload triggered so far, cascades included.
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Serialize the journal for replay or sync.
    pub fn encode_journal(&self) -> Result<Vec<u8>> {
        journal::encode(&self.journal)
    }

    /// Read back a journal produced by [`GameState::encode_journal`].
    pub fn decode_journal(bytes: &[u8]) -> Result<Journal> {
        journal::decode(bytes)
    }

    /// How many triggers are currently running.
    #[must_use]
    pub fn cascade_depth(&self) -> u16 {
        self.depth
    }

    pub(crate) fn enter_cascade(&mut self, payload: &EventPayload) {
        self.journal.push_back(JournalEntry {
            depth: self.depth,
            payload: payload.clone(),
        });
        self.depth += 1;
    }

    pub(crate) fn leave_cascade(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("round", &self.round)
            .field("teams", &self.team_count())
            .field("cards", &self.cards.len())
            .field("journal", &self.journal.len())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DispatchOrder;
    use crate::player::ScriptedController;

    #[test]
    fn test_new_state() {
        let state = GameState::new(2, 42);
        assert_eq!(state.team_count(), 2);
        assert_eq!(state.round, 0);
        assert_eq!(state.rng.seed(), 42);
        assert_eq!(state.nexus(Team::BLUE).map(Nexus::health), Some(20));
        assert!(state.nexus(Team(5)).is_none());
        assert!(state.journal().is_empty());
    }

    #[test]
    fn test_from_config_validates() {
        let bad = EngineConfig::new(0);
        assert!(matches!(GameState::from_config(bad), Err(EngineError::InvalidConfig(_))));

        let config = EngineConfig::new(3)
            .with_starting_health(15)
            .with_dispatch_order(DispatchOrder::Shuffled);
        let state = GameState::from_config(config).unwrap();
        assert_eq!(state.team_count(), 3);
        assert_eq!(state.nexus(Team(2)).map(Nexus::health), Some(15));
    }

    #[test]
    fn test_with_controllers_count_mismatch() {
        let controllers: Vec<Box<dyn Controller>> = vec![Box::new(ScriptedController::default())];
        let result = GameState::with_controllers(EngineConfig::new(2), controllers);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_alloc_entity_monotonic() {
        let mut state = GameState::new(2, 1);
        let a = state.alloc_entity();
        let b = state.alloc_entity();
        assert!(b > a);

        state
            .add_card(Card::unit(EntityId(100), "Big", Team::BLUE, 1, 1))
            .unwrap();
        assert_eq!(state.alloc_entity(), EntityId(101));
    }

    #[test]
    fn test_add_card_rejects_existing_id() {
        let mut state = GameState::new(2, 1);
        let id = state
            .spawn_card(|id| Card::unit(id, "Poro", Team::BLUE, 1, 1).in_zone(Zone::Hand))
            .unwrap();

        let impostor = Card::unit(id, "Impostor", Team::RED, 9, 9).in_zone(Zone::Board);
        let result = state.add_card(impostor);
        assert!(matches!(result, Err(EngineError::DuplicateCard(dup)) if dup == id));

        assert_eq!(state.card(id).unwrap().name, "Poro");
        assert_eq!(state.player(Team::BLUE).unwrap().hand.len(), 1);
        assert!(state.player(Team::RED).unwrap().board.is_empty());
        assert_eq!(state.card_count(), 1);
    }

    #[test]
    fn test_add_card_places_in_zone() {
        let mut state = GameState::new(2, 1);
        let id = state
            .spawn_card(|id| Card::unit(id, "Poro", Team::RED, 1, 1).in_zone(Zone::Hand))
            .unwrap();

        let red = state.player(Team::RED).unwrap();
        assert!(red.hand.contains(id));
        assert_eq!(state.try_card(id).unwrap().name, "Poro");
    }

    #[test]
    fn test_add_card_unknown_team() {
        let mut state = GameState::new(2, 1);
        let result = state.add_card(Card::unit(EntityId(0), "Lost", Team(9), 1, 1));
        assert!(matches!(result, Err(EngineError::UnknownTeam(Team(9)))));
    }

    #[test]
    fn test_move_and_remove_card() {
        let mut state = GameState::new(2, 1);
        let id = state
            .spawn_card(|id| Card::unit(id, "Poro", Team::BLUE, 1, 1).in_zone(Zone::Hand))
            .unwrap();

        assert!(state.move_card(id, Zone::Board));
        let blue = state.player(Team::BLUE).unwrap();
        assert!(!blue.hand.contains(id));
        assert_eq!(blue.board, vec![id]);
        assert_eq!(state.card(id).unwrap().zone, Zone::Board);

        let removed = state.remove_card(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(state.card(id).is_none());
        assert!(state.player(Team::BLUE).unwrap().board.is_empty());
        assert!(matches!(state.try_card(id), Err(EngineError::UnknownCard(_))));
        assert!(!state.move_card(id, Zone::Hand));
    }

    #[test]
    fn test_ask_controller_filters_options() {
        let controllers: Vec<Box<dyn Controller>> = vec![
            Box::new(ScriptedController::new([EntityId(7), EntityId(3)])),
            Box::new(RandomController),
        ];
        let mut state = GameState::with_controllers(EngineConfig::new(2), controllers).unwrap();

        assert_eq!(state.ask_controller(Team::BLUE, &[]), None);
        assert_eq!(
            state.ask_controller(Team::BLUE, &[EntityId(3), EntityId(4)]),
            Some(EntityId(3))
        );
        assert_eq!(state.ask_controller(Team(4), &[EntityId(3)]), None);
    }

    #[test]
    fn test_shuffle_deck_is_seeded() {
        let deck_order = |seed| {
            let mut state = GameState::new(2, seed);
            for _ in 0..10 {
                state
                    .spawn_card(|id| Card::unit(id, "Recruit", Team::BLUE, 1, 1))
                    .unwrap();
            }
            assert!(state.shuffle_deck(Team::BLUE));
            state.player(Team::BLUE).unwrap().deck.as_slice().to_vec()
        };
        assert_eq!(deck_order(4), deck_order(4));
        assert!(!GameState::new(2, 4).shuffle_deck(Team(3)));
    }

    #[test]
    fn test_destroyed_nexuses() {
        let mut state = GameState::new(2, 1);
        assert!(state.destroyed_nexuses().is_empty());
        state.nexus_mut(Team::RED).unwrap().damage(25);
        assert_eq!(state.destroyed_nexuses().as_slice(), &[Team::RED]);
    }
}
