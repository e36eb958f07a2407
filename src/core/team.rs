//! Team identification and per-team storage.
//!
//! A `Team` identifies one seat at the table: its player, that player's nexus,
//! and every card the player owns. `TeamMap` stores one value per team with
//! O(1) indexing.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Team identifier. Teams are 0-based: the first team is `Team(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    /// The first team in a two-team game.
    pub const BLUE: Team = Team(0);
    /// The second team in a two-team game.
    pub const RED: Team = Team(1);

    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The team that acts after this one.
    ///
    /// ```
    /// use ccg_dispatch::core::Team;
    ///
    /// assert_eq!(Team::BLUE.next(2), Team::RED);
    /// assert_eq!(Team::RED.next(2), Team::BLUE);
    /// ```
    #[must_use]
    pub const fn next(self, team_count: usize) -> Self {
        Self(((self.0 as usize + 1) % team_count) as u8)
    }

    /// Iterate over every team in a game with `team_count` teams.
    pub fn all(team_count: usize) -> impl Iterator<Item = Team> {
        (0..team_count as u8).map(Team)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-team data storage backed by a `Vec`.
///
/// ```
/// use ccg_dispatch::core::{Team, TeamMap};
///
/// let mut health: TeamMap<i64> = TeamMap::new(2, |_| 20);
/// health[Team::RED] -= 3;
/// assert_eq!(health[Team::BLUE], 20);
/// assert_eq!(health[Team::RED], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: Vec<T>,
}

impl<T> TeamMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(team_count: usize, factory: impl FnMut(Team) -> T) -> Self {
        assert!(team_count > 0, "Must have at least 1 team");
        assert!(team_count <= 255, "At most 255 teams supported");

        let data = (0..team_count as u8).map(Team).map(factory).collect();
        Self { data }
    }

    /// Create a map with default values.
    pub fn with_default(team_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(team_count, |_| T::default())
    }

    /// Build a map from already constructed values, one per team in order.
    pub(crate) fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `team` has an entry.
    #[must_use]
    pub fn contains(&self, team: Team) -> bool {
        team.index() < self.data.len()
    }

    /// Get a team's value, or `None` for an unknown team.
    #[must_use]
    pub fn get(&self, team: Team) -> Option<&T> {
        self.data.get(team.index())
    }

    /// Get a mutable team value, or `None` for an unknown team.
    pub fn get_mut(&mut self, team: Team) -> Option<&mut T> {
        self.data.get_mut(team.index())
    }

    /// Iterate over (Team, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Team(i as u8), v))
    }

    /// Iterate over (Team, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Team, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Team(i as u8), v))
    }

    /// Iterate over the values in team order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over the values in team order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}
