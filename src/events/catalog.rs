//! The closed set of event categories and the payload sum type.
//!
//! One macro invocation lists every category once. From it come the
//! `EventCategory` enum, the `EventPayload` enum (one variant per category,
//! wrapping the payload struct of the same name), and the exhaustive matches
//! that route a payload to its category, team and baseline.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Team};

use super::envelope::Event;
use super::payload::*;

macro_rules! event_catalog {
    ($( $(#[$meta:meta])* $name:ident ),+ $(,)?) => {
        /// Kind of occurrence. The sole lookup key of both registries.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum EventCategory {
            $( $(#[$meta])* $name, )+
        }

        impl EventCategory {
            /// Every category, in declaration order.
            pub const ALL: &'static [EventCategory] = &[$( EventCategory::$name ),+];

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( EventCategory::$name => stringify!($name), )+
                }
            }
        }

        /// One concrete event record. Exactly one is active per envelope.
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub enum EventPayload {
            $( $name($name), )+
        }

        impl EventPayload {
            #[must_use]
            pub fn category(&self) -> EventCategory {
                match self {
                    $( EventPayload::$name(_) => EventCategory::$name, )+
                }
            }

            /// Team on whose behalf the event happened.
            #[must_use]
            pub fn team(&self) -> Team {
                match self {
                    $( EventPayload::$name(p) => p.team, )+
                }
            }

            pub(crate) fn apply_baseline(&self, state: &mut GameState) {
                match self {
                    $( EventPayload::$name(p) => Baseline::apply(p, state), )+
                }
            }
        }

        $(
            impl From<$name> for EventPayload {
                fn from(payload: $name) -> Self {
                    EventPayload::$name(payload)
                }
            }

            impl From<$name> for Event {
                fn from(payload: $name) -> Self {
                    Event::new(EventPayload::$name(payload))
                }
            }
        )+
    };
}

event_catalog! {
    /// A team declared an attack.
    Attack,
    /// A team declared blockers.
    Block,
    /// A spell resolved.
    Cast,
    CardDrawn,
    CardDiscarded,
    CardPlayed,
    /// A unit entered the board.
    Summon,
    /// A unit returned to hand.
    Recall,
    /// A unit struck another unit or the nexus.
    Strike,
    UnitDamage,
    NexusDamage,
    HealUnit,
    UnitDied,
    Stun,
    LevelUp,
    GainManaGem,
    /// A team reached the mana gem limit.
    Enlightenment,
    RoundStart,
    RoundEnd,
    /// The first card played in a round.
    Daybreak,
    /// A card played after another in the same round.
    Nightfall,
    /// A card was chosen as the target of an ability.
    Target,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn test_all_categories_listed() {
        assert_eq!(EventCategory::ALL.len(), 22);
        assert_eq!(EventCategory::ALL[0], EventCategory::Attack);
        assert_eq!(EventCategory::ALL[21], EventCategory::Target);
    }

    #[test]
    fn test_names() {
        assert_eq!(EventCategory::NexusDamage.name(), "NexusDamage");
        assert_eq!(EventCategory::RoundStart.to_string(), "RoundStart");
    }

    #[test]
    fn test_payload_routing() {
        let payload: EventPayload = Stun {
            team: Team::RED,
            cause: None,
            unit: EntityId(4),
        }
        .into();

        assert_eq!(payload.category(), EventCategory::Stun);
        assert_eq!(payload.team(), Team::RED);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&EventCategory::CardPlayed).unwrap();
        assert_eq!(json, "\"CardPlayed\"");
        let back: EventCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventCategory::CardPlayed);
    }
}
