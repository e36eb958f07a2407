//! Engine configuration.
//!
//! Sessions configure the engine at startup with an `EngineConfig`: how many
//! teams sit at the table, nexus health, hand and mana limits, the RNG seed
//! and how simultaneous reactions are ordered. The config is plain data and
//! can be loaded from JSON.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Order in which subscribers of one category are notified.
///
/// The rules give no priority between reactions to the same event, so the
/// engine does not invent one. Sessions pick a policy here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOrder {
    /// Notify subscribers in the order they subscribed.
    #[default]
    Registration,
    /// Shuffle subscribers with the game RNG before each dispatch.
    /// Still reproducible for a fixed seed.
    Shuffled,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of teams (1-255).
    pub team_count: usize,

    /// Nexus health at game start.
    pub starting_health: i64,

    /// Cards a hand can hold. Draws beyond this burn the card.
    pub max_hand_size: usize,

    /// Upper bound on mana gems.
    pub max_mana_gems: u32,

    /// Upper bound on banked spell mana.
    pub max_spell_mana: u32,

    /// RNG seed. `None` draws one from system entropy.
    pub seed: Option<u64>,

    /// Tie-break policy for simultaneous reactions.
    pub dispatch_order: DispatchOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            team_count: 2,
            starting_health: 20,
            max_hand_size: 10,
            max_mana_gems: 10,
            max_spell_mana: 3,
            seed: None,
            dispatch_order: DispatchOrder::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default limits for `team_count` teams.
    pub fn new(team_count: usize) -> Self {
        Self {
            team_count,
            ..Self::default()
        }
    }

    /// Set the starting nexus health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the mana gem limit.
    #[must_use]
    pub fn with_max_mana_gems(mut self, gems: u32) -> Self {
        self.max_mana_gems = gems;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the dispatch tie-break policy.
    #[must_use]
    pub fn with_dispatch_order(mut self, order: DispatchOrder) -> Self {
        self.dispatch_order = order;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.team_count == 0 {
            return Err(EngineError::InvalidConfig(
                "team_count must be at least 1".into(),
            ));
        }
        if self.team_count > 255 {
            return Err(EngineError::InvalidConfig(format!(
                "team_count {} exceeds 255",
                self.team_count
            )));
        }
        if self.starting_health <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "starting_health must be positive, got {}",
                self.starting_health
            )));
        }
        if self.max_hand_size == 0 {
            return Err(EngineError::InvalidConfig(
                "max_hand_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
