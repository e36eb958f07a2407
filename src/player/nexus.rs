//! The nexus: a player's health pool and active passive effects.

use crate::core::Team;
use crate::effects::EffectRegistry;

/// A team's nexus.
#[derive(Clone, Debug)]
pub struct Nexus {
    team: Team,
    health: i64,
    max_health: i64,
    /// Passive effects currently active for this player.
    pub effects: EffectRegistry,
}

impl Nexus {
    /// Create a nexus at full health.
    #[must_use]
    pub fn new(team: Team, health: i64) -> Self {
        Self {
            team,
            health,
            max_health: health,
            effects: EffectRegistry::new(),
        }
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn health(&self) -> i64 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.max_health
    }

    /// Subtract `amount` from health. Health may go negative.
    pub fn damage(&mut self, amount: i64) {
        self.health = self.health.saturating_sub(amount.max(0));
    }

    /// Restore up to `amount` health without exceeding the maximum.
    pub fn heal(&mut self, amount: i64) {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
    }

    /// A nexus at zero health or below has lost.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}
