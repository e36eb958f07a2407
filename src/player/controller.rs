//! Decision sources.
//!
//! A `Controller` answers the questions rules ask a player (which unit to
//! target, for instance). It takes no part in dispatch mechanics. Human input
//! arrives through a `ScriptedController` fed by the session; automated play
//! uses `RandomController`.

use std::collections::VecDeque;
use std::fmt;

use crate::core::{EntityId, GameRng};

/// Supplies decisions for one player.
pub trait Controller: fmt::Debug {
    /// Pick one of `options`, or `None` to decline.
    fn choose_target(&mut self, options: &[EntityId], rng: &mut GameRng) -> Option<EntityId>;

    /// Does a person stand behind this controller?
    fn is_human(&self) -> bool {
        false
    }
}

/// Replays decisions queued by the session (recorded or live human input).
///
/// Each request consumes queued picks until one is among the options.
/// An empty queue declines.
#[derive(Debug, Default)]
pub struct ScriptedController {
    choices: VecDeque<EntityId>,
}

impl ScriptedController {
    pub fn new(choices: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    /// Queue another decision.
    pub fn push(&mut self, choice: EntityId) {
        self.choices.push_back(choice);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.choices.len()
    }
}

impl Controller for ScriptedController {
    fn choose_target(&mut self, options: &[EntityId], _rng: &mut GameRng) -> Option<EntityId> {
        while let Some(choice) = self.choices.pop_front() {
            if options.contains(&choice) {
                return Some(choice);
            }
        }
        None
    }

    fn is_human(&self) -> bool {
        true
    }
}

/// Picks uniformly at random with the game RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomController;

impl Controller for RandomController {
    fn choose_target(&mut self, options: &[EntityId], rng: &mut GameRng) -> Option<EntityId> {
        rng.choose(options).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_skips_invalid_choices() {
        let mut controller = ScriptedController::new([EntityId(9), EntityId(2)]);
        let mut rng = GameRng::new(1);

        let picked = controller.choose_target(&[EntityId(1), EntityId(2)], &mut rng);
        assert_eq!(picked, Some(EntityId(2)));
        assert_eq!(controller.pending(), 0);
        assert_eq!(controller.choose_target(&[EntityId(1)], &mut rng), None);
        assert!(controller.is_human());
    }

    #[test]
    fn test_random_is_seeded() {
        let options = [EntityId(1), EntityId(2), EntityId(3), EntityId(4)];
        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..8)
                .map(|_| RandomController.choose_target(&options, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
        assert_eq!(RandomController.choose_target(&[], &mut GameRng::new(3)), None);
        assert!(!RandomController.is_human());
    }
}
